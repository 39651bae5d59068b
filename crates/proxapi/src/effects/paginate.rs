use std::marker::PhantomData;

/// Session settings for [`Proxy::call_until`](crate::Proxy::call_until).
///
/// Decides when a paginated session is finished, how parameters evolve
/// between calls, and how each page is folded into the result. All three
/// methods must be pure; the driver relies on [`is_complete`](Paginate::is_complete)
/// eventually returning `true`.
pub trait Paginate<P, T> {
    /// Element of the accumulated collection.
    type Item;

    /// Whether `page` is the last one.
    fn is_complete(&self, page: &T) -> bool;

    /// Parameters for the request following `page`.
    fn next_params(&self, page: &T, current: &P) -> P;

    /// Fold `page` into the items collected so far.
    fn aggregate(&self, collected: Vec<Self::Item>, page: T) -> Vec<Self::Item>;
}

/// [`Paginate`] implementation built from three closures.
///
/// # Examples
///
/// ```
/// use proxapi::{Paginate, PaginateFn};
///
/// struct Page { items: Vec<u32>, next: Option<u32> }
///
/// let pager = PaginateFn::new(
///     |page: &Page| page.next.is_none(),
///     |page: &Page, _cursor: &u32| page.next.unwrap_or_default(),
///     |mut all: Vec<u32>, page: Page| { all.extend(page.items); all },
/// );
///
/// let last = Page { items: vec![1, 2], next: None };
/// assert!(pager.is_complete(&last));
/// ```
pub struct PaginateFn<C, N, A, P, T, I> {
    is_complete: C,
    next_params: N,
    aggregate: A,
    _types: PhantomData<fn(P, T) -> I>,
}

impl<C, N, A, P, T, I> PaginateFn<C, N, A, P, T, I>
where
    C: Fn(&T) -> bool,
    N: Fn(&T, &P) -> P,
    A: Fn(Vec<I>, T) -> Vec<I>,
{
    pub fn new(is_complete: C, next_params: N, aggregate: A) -> Self {
        Self {
            is_complete,
            next_params,
            aggregate,
            _types: PhantomData,
        }
    }
}

impl<C, N, A, P, T, I> Paginate<P, T> for PaginateFn<C, N, A, P, T, I>
where
    C: Fn(&T) -> bool,
    N: Fn(&T, &P) -> P,
    A: Fn(Vec<I>, T) -> Vec<I>,
{
    type Item = I;

    fn is_complete(&self, page: &T) -> bool {
        (self.is_complete)(page)
    }

    fn next_params(&self, page: &T, current: &P) -> P {
        (self.next_params)(page, current)
    }

    fn aggregate(&self, collected: Vec<I>, page: T) -> Vec<I> {
        (self.aggregate)(collected, page)
    }
}

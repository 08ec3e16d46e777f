use crate::extract::Page;

#[derive(Debug, Clone, PartialEq)]
pub enum PagerMsg<T> {
    /// Decoded first page of the sequence.
    Seed(Page<T>),
    /// Decoded follow-up page.
    Continuation(Page<T>),
    /// A follow-up response carried no recognised continuation container.
    ContainerMissing,
}

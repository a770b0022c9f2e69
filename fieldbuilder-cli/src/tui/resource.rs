/// Lifecycle of remotely fetched data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Resource<T> {
    #[default]
    NotAsked,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }
}

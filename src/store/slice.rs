use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Token identifying one fetch invocation. Allocated by the coordinator.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Store-level error descriptor for a failed resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The backend says the resource does not exist.
    #[error("Resource not found")]
    NotFound,

    /// The session is missing or expired.
    #[error("Not authorized")]
    Unauthorized,

    /// Network, status or decoding failure; possibly retryable.
    #[error("{message}")]
    Transient { message: String },
}

impl FetchError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Independently fetched piece of server data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Offer,
    Nearby,
    Reviews,
    Offers,
    User,
    Favorites,
}

impl Resource {
    /// Resources that belong to the offer screen.
    pub const OFFER_SCREEN: [Resource; 3] = [Resource::Offer, Resource::Nearby, Resource::Reviews];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Offer => "offer",
            Resource::Nearby => "nearby",
            Resource::Reviews => "reviews",
            Resource::Offers => "offers",
            Resource::User => "user",
            Resource::Favorites => "favorites",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resource's data plus its request bookkeeping.
///
/// Data is `Arc`ed: a slice untouched by a transition keeps pointer
/// identity, which is what selectors rely on for stability.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    data: Option<Arc<T>>,
    status: RequestStatus,
    error: Option<FetchError>,
    /// Generation of the request currently allowed to settle this slice.
    in_flight: Option<Generation>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: RequestStatus::Idle,
            error: None,
            in_flight: None,
        }
    }
}

impl<T> Slice<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    pub fn shared(&self) -> Option<&Arc<T>> {
        self.data.as_ref()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Whether a completion tagged with `generation` may write this slice.
    ///
    /// Untagged writes always pass; tagged ones must match the request that
    /// is currently in flight, so superseded responses are dropped.
    pub fn admits(&self, generation: Option<Generation>) -> bool {
        match generation {
            None => true,
            Some(generation) => self.in_flight == Some(generation),
        }
    }

    pub fn set_status(self, status: RequestStatus) -> Self {
        Self { status, ..self }
    }

    /// Starts a tracked request: status becomes Loading, data is kept.
    pub fn begin(self, generation: Generation) -> Self {
        Self {
            status: RequestStatus::Loading,
            in_flight: Some(generation),
            ..self
        }
    }

    pub fn set_data(self, data: T) -> Self {
        self.set_shared(Arc::new(data))
    }

    pub fn set_shared(self, data: Arc<T>) -> Self {
        Self {
            data: Some(data),
            status: RequestStatus::Success,
            error: None,
            in_flight: None,
        }
    }

    /// Marks the slice failed. Existing data stays visible.
    pub fn set_error(self, error: FetchError) -> Self {
        Self {
            status: RequestStatus::Failed,
            error: Some(error),
            in_flight: None,
            ..self
        }
    }

    /// Drops data and any in-flight request.
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Cheap identity check: same bookkeeping and the same data `Arc`.
    /// Never looks inside the data.
    pub fn same_as(&self, other: &Self) -> bool {
        let same_data = match (&self.data, &other.data) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_data
            && self.status == other.status
            && self.error == other.error
            && self.in_flight == other.in_flight
    }
}

impl<T: Clone> Slice<T> {
    /// Rewrites the data in place without touching status bookkeeping.
    /// A `None` from `patch` keeps the original `Arc`.
    pub fn patch(self, patch: impl FnOnce(&T) -> Option<T>) -> Self {
        let data = match &self.data {
            Some(current) => match patch(current) {
                Some(updated) => Some(Arc::new(updated)),
                None => Some(Arc::clone(current)),
            },
            None => None,
        };
        Self { data, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_as_compares_pointers_not_contents() {
        let slice = Slice::default().set_data(vec![1.5_f32]);
        assert!(slice.same_as(&slice.clone()));

        let equal_copy = Slice::default().set_data(vec![1.5_f32]);
        assert!(!slice.same_as(&equal_copy));
        assert!(!slice.same_as(&slice.clone().set_status(RequestStatus::Loading)));
        assert!(Slice::<Vec<f32>>::default().same_as(&Slice::default()));
    }

    #[test]
    fn default_is_idle_and_empty() {
        let slice: Slice<u32> = Slice::default();
        assert_eq!(slice.status(), RequestStatus::Idle);
        assert!(slice.data().is_none());
        assert!(slice.error().is_none());
    }

    #[test]
    fn set_data_implies_success_and_clears_error() {
        let slice = Slice::default()
            .set_error(FetchError::transient("boom"))
            .set_data(5u32);
        assert_eq!(slice.status(), RequestStatus::Success);
        assert_eq!(slice.data(), Some(&5));
        assert!(slice.error().is_none());
    }

    #[test]
    fn set_error_keeps_stale_data() {
        let slice = Slice::default().set_data(5u32).set_error(FetchError::NotFound);
        assert_eq!(slice.status(), RequestStatus::Failed);
        assert_eq!(slice.data(), Some(&5));
        assert_eq!(slice.error(), Some(&FetchError::NotFound));
    }

    #[test]
    fn set_status_only_changes_the_tag() {
        let slice = Slice::default().set_data(5u32).set_status(RequestStatus::Loading);
        assert_eq!(slice.status(), RequestStatus::Loading);
        assert_eq!(slice.data(), Some(&5));
    }

    #[test]
    fn only_in_flight_generation_is_admitted() {
        let slice: Slice<u32> = Slice::default().begin(3);
        assert!(slice.admits(Some(3)));
        assert!(!slice.admits(Some(2)));
        assert!(slice.admits(None));

        let settled = slice.set_data(1);
        assert!(!settled.admits(Some(3)));
    }

    #[test]
    fn patch_keeps_pointer_when_unchanged() {
        let slice = Slice::default().set_data(vec![1u32, 2]);
        let before = Arc::clone(slice.shared().unwrap());
        let slice = slice.patch(|_| None);
        assert!(Arc::ptr_eq(&before, slice.shared().unwrap()));
        let slice = slice.patch(|items| Some(items.iter().map(|n| n * 10).collect()));
        assert_eq!(slice.data(), Some(&vec![10, 20]));
    }
}

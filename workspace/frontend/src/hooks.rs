use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

/// API fetch state enum
#[derive(Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }
}

/// Whether the component that started some async work is still mounted.
///
/// Every clone shares the flag. Results that arrive after [`Liveness::end`]
/// must be dropped instead of written into component state.
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn end(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Liveness {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A liveness flag that ends when the calling component unmounts.
#[hook]
pub fn use_liveness() -> Liveness {
    let liveness = use_memo((), |_| Liveness::new());
    {
        let liveness = (*liveness).clone();
        use_effect_with((), move |_| move || liveness.end());
    }
    (*liveness).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let liveness = Liveness::new();
        let in_flight = liveness.clone();
        assert!(in_flight.is_alive());

        liveness.end();

        assert!(!in_flight.is_alive());
        assert_eq!(liveness, in_flight);
        assert_ne!(liveness, Liveness::new());
    }

    #[test]
    fn fetch_state_exposes_data_only_on_success() {
        assert_eq!(FetchState::Success(3).data(), Some(&3));
        assert!(FetchState::<i32>::Loading.is_loading());
        assert_eq!(FetchState::<i32>::Error("down".into()).data(), None);
        assert!(matches!(FetchState::<i32>::default(), FetchState::NotStarted));
    }
}

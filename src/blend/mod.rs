//! Per-type blend functions: how to interpolate a value, what to return when
//! nothing is recorded, and how to copy it on the way in.
//!
//! A type gets its functions one of three ways:
//! - explicitly, by building a [`BlendFns`] by hand,
//! - from a [`BlendRegistry`] table (common scalar and nalgebra types are
//!   pre-registered by [`BlendRegistry::with_defaults`]),
//! - from its own [`Blend`] implementation.

use std::fmt;
use std::sync::Arc;

/// Default table of blend functions keyed by value type.
pub mod registry;

pub use registry::BlendRegistry;

/// `(earlier, later, alpha) -> blended`
pub type InterpolateFn<T> = Arc<dyn Fn(&T, &T, f32) -> T + Send + Sync>;
/// `(original) -> copy`
pub type CopyFn<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// A value type that knows how to blend itself.
///
/// Implementations must satisfy `interpolate(a, b, 0) == a` and
/// `interpolate(a, b, 1) == b`.
pub trait Blend: Clone {
    /// Whether stored values go through [`Blend::copy`] first.
    const COPIES: bool = false;

    fn interpolate(earlier: &Self, later: &Self, alpha: f32) -> Self;

    /// Returned when there is no data to read.
    fn default_value() -> Self;

    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Interpolate / default / copy triple used by tapes and delays.
pub struct BlendFns<T> {
    interpolate: Option<InterpolateFn<T>>,
    default: T,
    copy: Option<CopyFn<T>>,
}

impl<T> BlendFns<T> {
    pub fn new<F>(interpolate: F, default: T) -> Self
    where
        F: Fn(&T, &T, f32) -> T + Send + Sync + 'static,
    {
        Self {
            interpolate: Some(Arc::new(interpolate)),
            default,
            copy: None,
        }
    }

    /// No interpolator: reads snap to whichever neighbour is closer,
    /// the later one on an exact tie.
    pub fn stepped(default: T) -> Self {
        Self {
            interpolate: None,
            default,
            copy: None,
        }
    }

    /// Copy values through `copy` before they are stored.
    pub fn with_copy<F>(mut self, copy: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.copy = Some(Arc::new(copy));
        self
    }

    /// Functions taken from the type's own [`Blend`] impl.
    pub fn of() -> Self
    where
        T: Blend + 'static,
    {
        let copy: Option<CopyFn<T>> = if T::COPIES {
            Some(Arc::new(|value: &T| value.copy()))
        } else {
            None
        };

        Self {
            interpolate: Some(Arc::new(T::interpolate)),
            default: T::default_value(),
            copy,
        }
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn has_interpolator(&self) -> bool {
        self.interpolate.is_some()
    }

    pub fn has_copy(&self) -> bool {
        self.copy.is_some()
    }

    /// Blend `earlier` towards `later` by `alpha`.
    pub fn blend(&self, earlier: &T, later: &T, alpha: f32) -> T
    where
        T: Clone,
    {
        match &self.interpolate {
            Some(interpolate) => interpolate(earlier, later, alpha),
            None if alpha >= 0.5 => later.clone(),
            None => earlier.clone(),
        }
    }

    /// Prepare an incoming value for storage.
    pub(crate) fn store(&self, value: T) -> T {
        match &self.copy {
            Some(copy) => copy(&value),
            None => value,
        }
    }
}

impl<T: Clone> Clone for BlendFns<T> {
    fn clone(&self) -> Self {
        Self {
            interpolate: self.interpolate.clone(),
            default: self.default.clone(),
            copy: self.copy.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BlendFns<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendFns")
            .field("interpolate", &self.interpolate.is_some())
            .field("default", &self.default)
            .field("copy", &self.copy.is_some())
            .finish()
    }
}

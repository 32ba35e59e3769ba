use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use nalgebra::{Matrix4, UnitQuaternion, Vector2, Vector3, Vector4};
use tracing::{debug, trace};

use super::{Blend, BlendFns};
use crate::error::TapeError;

/// Table of [`BlendFns`] keyed by value type.
///
/// Build one at startup, register your own types, then hand it by
/// reference to the `from_registry` constructors. Entries are append-only:
/// registering a type a second time leaves the first entry in place.
#[derive(Debug)]
pub struct BlendRegistry {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl BlendRegistry {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A table holding the common scalar, vector, quaternion and matrix types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(BlendFns::new(|a: &f32, b: &f32, p| a * (1.0 - p) + b * p, 0.0_f32));
        registry.register(BlendFns::new(
            |a: &f64, b: &f64, p| {
                let p = p as f64;
                a * (1.0 - p) + b * p
            },
            0.0_f64,
        ));

        registry.register(BlendFns::new(step::<bool>, false));
        registry.register(BlendFns::new(step::<i32>, 0_i32));
        registry.register(BlendFns::new(step::<u32>, 0_u32));
        registry.register(BlendFns::new(step::<i64>, 0_i64));
        registry.register(BlendFns::new(step::<u64>, 0_u64));

        registry.register(BlendFns::new(
            |a: &Vector2<f32>, b: &Vector2<f32>, p| a.lerp(b, p),
            Vector2::zeros(),
        ));
        registry.register(BlendFns::new(
            |a: &Vector3<f32>, b: &Vector3<f32>, p| a.lerp(b, p),
            Vector3::zeros(),
        ));
        registry.register(BlendFns::new(
            |a: &Vector4<f32>, b: &Vector4<f32>, p| a.lerp(b, p),
            Vector4::zeros(),
        ));
        registry.register(BlendFns::new(
            |a: &UnitQuaternion<f32>, b: &UnitQuaternion<f32>, p| {
                // slerp is undefined for opposite rotations
                a.try_slerp(b, p, f32::EPSILON)
                    .unwrap_or_else(|| a.nlerp(b, p))
            },
            UnitQuaternion::identity(),
        ));
        registry.register(BlendFns::new(
            |a: &Matrix4<f32>, b: &Matrix4<f32>, p| *a * (1.0 - p) + *b * p,
            Matrix4::identity(),
        ));

        registry
    }

    /// Register `T`. Returns the stored entry, or `None` if `T` was
    /// already present.
    pub fn register<T>(&mut self, fns: BlendFns<T>) -> Option<BlendFns<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if self.entries.contains_key(&key) {
            trace!(value_type = type_name::<T>(), "blend functions already registered");
            return None;
        }

        debug!(value_type = type_name::<T>(), "registering blend functions");
        self.entries.insert(key, Box::new(fns.clone()));
        Some(fns)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Blend functions registered for `T`.
    pub fn lookup<T>(&self) -> Result<BlendFns<T>, TapeError>
    where
        T: Clone + 'static,
    {
        self.find::<T>().ok_or_else(|| {
            debug!(value_type = type_name::<T>(), "no blend functions registered");
            TapeError::not_registered::<T>()
        })
    }

    /// Registered functions for `T` if any, otherwise `T`'s own [`Blend`] impl.
    pub fn resolve<T>(&self) -> BlendFns<T>
    where
        T: Blend + 'static,
    {
        self.find::<T>().unwrap_or_else(BlendFns::of)
    }

    fn find<T: Clone + 'static>(&self) -> Option<BlendFns<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<BlendFns<T>>())
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BlendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Hold `a` until past the midpoint, then switch to `b`.
fn step<T: Clone>(a: &T, b: &T, p: f32) -> T {
    if p > 0.5 {
        b.clone()
    } else {
        a.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Gain(f32);

    impl Blend for Gain {
        fn interpolate(earlier: &Self, later: &Self, alpha: f32) -> Self {
            Gain(earlier.0 + (later.0 - earlier.0) * alpha)
        }

        fn default_value() -> Self {
            Gain(1.0)
        }
    }

    #[test]
    fn defaults_cover_common_types() {
        let registry = BlendRegistry::with_defaults();
        assert!(registry.contains::<f32>());
        assert!(registry.contains::<f64>());
        assert!(registry.contains::<bool>());
        assert!(registry.contains::<u64>());
        assert!(registry.contains::<Vector3<f32>>());
        assert!(registry.contains::<UnitQuaternion<f32>>());
        assert!(registry.contains::<Matrix4<f32>>());
        assert!(!registry.contains::<String>());
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn second_registration_is_ignored() {
        let mut registry = BlendRegistry::with_defaults();
        let again = registry.register(BlendFns::new(|_: &f32, _: &f32, _| 99.0, 42.0_f32));
        assert!(again.is_none());

        let fns = registry.lookup::<f32>().unwrap();
        assert_eq!(*fns.default_value(), 0.0);
    }

    #[test]
    fn lookup_unregistered_type_fails() {
        let registry = BlendRegistry::with_defaults();
        let err = registry.lookup::<String>().err();
        assert!(matches!(err, Some(TapeError::TypeNotRegistered { .. })));
    }

    #[test]
    fn resolve_prefers_registry_over_blend_impl() {
        let mut registry = BlendRegistry::new();
        assert_eq!(*registry.resolve::<Gain>().default_value(), Gain(1.0));

        registry.register(BlendFns::stepped(Gain(0.5)));
        let fns = registry.resolve::<Gain>();
        assert_eq!(*fns.default_value(), Gain(0.5));
        assert!(!fns.has_interpolator());
    }

    #[test]
    fn integers_step_after_midpoint() {
        let fns = BlendRegistry::with_defaults().lookup::<i32>().unwrap();
        assert_eq!(fns.blend(&1, &5, 0.5), 1);
        assert_eq!(fns.blend(&1, &5, 0.51), 5);
    }

    #[test]
    fn vectors_lerp() {
        let fns = BlendRegistry::with_defaults().lookup::<Vector2<f32>>().unwrap();
        let mid = fns.blend(&Vector2::new(0.0, 0.0), &Vector2::new(2.0, 4.0), 0.5);
        assert_eq!(mid, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn quaternions_slerp() {
        let fns = BlendRegistry::with_defaults()
            .lookup::<UnitQuaternion<f32>>()
            .unwrap();
        let a = UnitQuaternion::identity();
        let b = UnitQuaternion::from_euler_angles(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let mid = fns.blend(&a, &b, 0.5);
        assert!((mid.angle() - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert_eq!(*fns.default_value(), UnitQuaternion::identity());
    }

    #[test]
    fn matrices_lerp_componentwise() {
        let fns = BlendRegistry::with_defaults().lookup::<Matrix4<f32>>().unwrap();
        let zero = Matrix4::zeros();
        let mid = fns.blend(&zero, &Matrix4::identity(), 0.5);
        assert_eq!(mid, Matrix4::identity() * 0.5);
    }
}

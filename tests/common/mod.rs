//! Behaviour libraries shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use comfe_behaviour::{
    BehaviourMetadata, BehaviourRegistry, Bounds, FunctionMetadata, Hypothesis, RotationRoutines, Symbol,
};

pub const LIBRARY: &str = "libBehaviour.so";

/// Integration routine stored in the symbols of the test behaviours.
pub type Integrate = fn(&mut [f64], &[f64]);

pub fn integrate(stress: &mut [f64], strain: &[f64]) {
    for (s, e) in stress.iter_mut().zip(strain) {
        *s = 2.0 * e;
    }
}

pub fn symbol(name: &str) -> Symbol {
    Symbol::new(name, integrate as Integrate)
}

/// Isotropic small strain behaviour without rotation routines.
pub fn elasticity() -> BehaviourMetadata {
    BehaviourMetadata::small_strain(symbol("Elasticity"))
        .with_material_property("YoungModulus")
        .with_material_property("PoissonRatio")
        .with_internal_state_variable("ElasticStrain", 1)
        .with_parameter("epsilon", 1e-14)
        .with_parameter("iterMax", 100i32)
        .with_parameter("numberOfSubSteps", 4u16)
        .with_bounds("YoungModulus", Bounds::new(Some(0.0), None))
        .with_physical_bounds("PoissonRatio", Bounds::new(Some(-1.0), Some(0.5)))
}

/// Orthotropic small strain behaviour rotated by the reference routines.
pub fn orthotropic_elasticity() -> BehaviourMetadata {
    let mut m = BehaviourMetadata::small_strain(symbol("OrthotropicElasticity"))
        .with_internal_state_variable("EquivalentPlasticStrain", 0)
        .with_standard_rotations();
    m.requires_stiffness_tensor = true;
    m.elastic_stiffness_symmetry = 1;
    m.requires_thermal_expansion_coefficient_tensor = true;
    m
}

pub fn finite_strain_elasticity() -> BehaviourMetadata {
    BehaviourMetadata::finite_strain(symbol("SaintVenantKirchhoffElasticity")).with_standard_rotations()
}

pub fn cohesive_zone_model() -> BehaviourMetadata {
    BehaviourMetadata::cohesive_zone(symbol("TvergaardCohesiveZoneModel"))
        .with_hypotheses([Hypothesis::PlaneStrain, Hypothesis::Tridimensional])
}

/// Behaviour generated by an older version, exporting the names of its
/// external state variables only.
pub fn legacy_external_state_variables() -> BehaviourMetadata {
    let mut m = BehaviourMetadata::small_strain(symbol("LegacyElasticity"));
    m.external_state_variables_types = None;
    m.with_external_state_variable("Porosity", 1)
        .with_external_state_variable("Irradiation", 1)
}

/// General behaviour with initialize functions and post-processings.
pub fn general_behaviour() -> BehaviourMetadata {
    BehaviourMetadata::new(symbol("DiffusionBehaviour"))
        .with_gradient("TemperatureGradient", 2)
        .with_thermodynamic_force("HeatFlux", 2)
        .with_tangent_operator_block("HeatFlux", "TemperatureGradient")
        .with_external_state_variable("Pressure", 0)
        .with_initialize_function(
            "ElasticStrainFromInitialStress",
            FunctionMetadata::new(Symbol::new("init", ())).with_variable("Stress", 1),
        )
        .with_post_processing(
            "PrincipalStrain",
            FunctionMetadata::new(Symbol::new("pp", ()))
                .with_variable("PrincipalStrain", 2)
                .with_variable("Trace", 0),
        )
}

pub fn registry() -> BehaviourRegistry {
    BehaviourRegistry::new()
        .with_behaviour(LIBRARY, "Elasticity", elasticity())
        .with_behaviour(LIBRARY, "OrthotropicElasticity", orthotropic_elasticity())
        .with_behaviour(LIBRARY, "SaintVenantKirchhoffElasticity", finite_strain_elasticity())
        .with_behaviour(LIBRARY, "TvergaardCohesiveZoneModel", cohesive_zone_model())
        .with_behaviour(LIBRARY, "LegacyElasticity", legacy_external_state_variables())
        .with_behaviour(LIBRARY, "DiffusionBehaviour", general_behaviour())
}

/// Counts the calls to exported rotation routines.
#[derive(Default)]
pub struct CallCounter {
    pub single: AtomicUsize,
    pub batched: AtomicUsize,
}

impl CallCounter {
    pub fn single(&self) -> usize {
        self.single.load(Ordering::SeqCst)
    }

    pub fn batched(&self) -> usize {
        self.batched.load(Ordering::SeqCst)
    }
}

/// Routines copying their source and recording every call.
pub fn counting_routines(counter: &Arc<CallCounter>) -> RotationRoutines {
    let (c1, c2) = (Arc::clone(counter), Arc::clone(counter));
    RotationRoutines::Exported {
        single: Arc::new(move |destination: &mut [f64], source: &[f64], _matrix: &[f64; 9]| {
            c1.single.fetch_add(1, Ordering::SeqCst);
            destination.copy_from_slice(source);
        }),
        batched: Arc::new(move |destination: &mut [f64], source: &[f64], _matrix: &[f64; 9], _n: usize| {
            c2.batched.fetch_add(1, Ordering::SeqCst);
            destination.copy_from_slice(source);
        }),
    }
}

/// Orthotropic behaviour whose rotation routines only record their calls.
pub fn counting_registry(counter: &Arc<CallCounter>) -> BehaviourRegistry {
    let mut m = BehaviourMetadata::small_strain(symbol("OrthotropicElasticity"))
        .with_gradients_rotation(counting_routines(counter))
        .with_thermodynamic_forces_rotation(None, counting_routines(counter))
        .with_tangent_operator_blocks_rotation(None, counting_routines(counter));
    m.symmetry = 1;
    BehaviourRegistry::new().with_behaviour(LIBRARY, "OrthotropicElasticity", m)
}

pub fn assert_close(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "length mismatch");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() < tolerance, "component {}: {} vs {}", i, x, y);
    }
}

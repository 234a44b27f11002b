//! Integration tests for the behaviour descriptor builder.

mod common;

use comfe_behaviour::{
    has_bounds, has_lower_bound, has_physical_bounds, has_upper_bound, is_standard_finite_strain_behaviour, load,
    load_with_options, lower_bound, lower_physical_bound, parameter_default_value, set_parameter, upper_bound,
    upper_physical_bound, BehaviourError, BehaviourMetadata, BehaviourRegistry, BehaviourResolver, BehaviourType,
    FiniteStrainBehaviourOptions, Hypothesis, Kinematic, LoadErrorKind, ParameterValue, StressMeasure, Symmetry,
    TangentOperator, VariableType, BEHAVIOUR_API_VERSION,
};

use common::{registry, symbol, LIBRARY};

fn names(variables: &[comfe_behaviour::Variable]) -> Vec<&str> {
    variables.iter().map(|v| v.name.as_str()).collect()
}

fn load_error(result: comfe_behaviour::Result<comfe_behaviour::Behaviour>) -> LoadErrorKind {
    match result {
        Err(BehaviourError::Load { kind, .. }) => kind,
        Err(e) => panic!("unexpected error: {}", e),
        Ok(b) => panic!("behaviour '{}' loaded", b.behaviour()),
    }
}

fn single(name: &str, metadata: BehaviourMetadata) -> BehaviourRegistry {
    BehaviourRegistry::new().with_behaviour(LIBRARY, name, metadata)
}

// ─── Small Strain Behaviours ──────────────────────────────────

#[test]
fn small_strain_behaviour() {
    let r = registry();
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(b.library(), LIBRARY);
    assert_eq!(b.function(), "Elasticity_Tridimensional");
    assert_eq!(b.symbol().name(), "Elasticity");
    assert_eq!(b.behaviour_type(), BehaviourType::StandardStrainBased);
    assert_eq!(b.kinematic(), Kinematic::SmallStrain);
    assert_eq!(b.symmetry(), Symmetry::Isotropic);
    assert_eq!(names(b.gradients()), ["Strain"]);
    assert_eq!(names(b.thermodynamic_forces()), ["Stress"]);
    assert_eq!(names(b.material_properties()), ["YoungModulus", "PoissonRatio"]);
    assert_eq!(names(b.internal_state_variables()), ["ElasticStrain"]);
    assert_eq!(names(b.external_state_variables()), ["Temperature"]);
    assert_eq!(b.gradients_size(), 6);
    assert_eq!(b.thermodynamic_forces_size(), 6);
    assert_eq!(b.tangent_operator_size(), 36);
    assert!(b.options().is_empty());
    assert!(!b.rotate_gradients_capability().is_available());
    assert!(!b.rotate_thermodynamic_forces_capability().is_available());
    assert!(!b.rotate_tangent_operator_blocks_capability().is_available());
}

#[test]
fn sizes_follow_the_hypothesis() {
    let r = registry();
    for (h, stensor) in [
        (Hypothesis::AxisymmetricalGeneralisedPlaneStrain, 3),
        (Hypothesis::PlaneStrain, 4),
        (Hypothesis::Tridimensional, 6),
    ] {
        let b = load(&r, LIBRARY, "Elasticity", h).unwrap();
        assert_eq!(b.gradients_size(), stensor);
        assert_eq!(b.tangent_operator_size(), stensor * stensor);
    }
}

#[test]
fn loading_twice_gives_the_same_descriptor() {
    let r = registry();
    let b1 = load(&r, LIBRARY, "OrthotropicElasticity", Hypothesis::PlaneStrain).unwrap();
    let b2 = load(&r, LIBRARY, "OrthotropicElasticity", Hypothesis::PlaneStrain).unwrap();
    assert_eq!(b1.gradients(), b2.gradients());
    assert_eq!(b1.thermodynamic_forces(), b2.thermodynamic_forces());
    assert_eq!(b1.material_properties(), b2.material_properties());
    assert_eq!(b1.internal_state_variables(), b2.internal_state_variables());
    assert_eq!(b1.external_state_variables(), b2.external_state_variables());
    assert_eq!(b1.tangent_operator_blocks(), b2.tangent_operator_blocks());
}

#[test]
fn orthotropic_material_properties() {
    let r = registry();
    let b = load(&r, LIBRARY, "OrthotropicElasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(b.symmetry(), Symmetry::Orthotropic);
    assert_eq!(
        names(b.material_properties()),
        [
            "YoungModulus1",
            "YoungModulus2",
            "YoungModulus3",
            "PoissonRatio12",
            "PoissonRatio23",
            "PoissonRatio13",
            "ShearModulus12",
            "ShearModulus23",
            "ShearModulus13",
            "ThermalExpansion1",
            "ThermalExpansion2",
            "ThermalExpansion3",
        ]
    );
    assert!(b.rotate_gradients_capability().is_available());
    assert!(b.rotate_thermodynamic_forces_capability().is_available());
    assert!(b.rotate_tangent_operator_blocks_capability().is_available());

    let b = load(&r, LIBRARY, "OrthotropicElasticity", Hypothesis::PlaneStrain).unwrap();
    assert_eq!(b.material_properties().len(), 10);
    assert_eq!(b.material_properties()[6].name, "ShearModulus12");
    let b = load(&r, LIBRARY, "OrthotropicElasticity", Hypothesis::AxisymmetricalGeneralisedPlaneStrain).unwrap();
    assert_eq!(b.material_properties().len(), 9);
}

#[test]
fn orthotropic_stiffness_requires_an_orthotropic_behaviour() {
    let mut m = common::elasticity();
    m.requires_stiffness_tensor = true;
    m.elastic_stiffness_symmetry = 1;
    let r = single("Elasticity", m);
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert!(matches!(kind, LoadErrorKind::InconsistentVariableContract(_)));
}

#[test]
fn isotropic_stiffness_and_thermal_expansion() {
    let mut m = common::elasticity();
    m.requires_stiffness_tensor = true;
    m.requires_thermal_expansion_coefficient_tensor = true;
    let r = single("Elasticity", m);
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(
        names(b.material_properties()),
        ["YoungModulus", "PoissonRatio", "ThermalExpansion", "YoungModulus", "PoissonRatio"]
    );
}

#[test]
fn legacy_external_state_variables_are_scalars() {
    let r = registry();
    let b = load(&r, LIBRARY, "LegacyElasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(names(b.external_state_variables()), ["Temperature", "Porosity", "Irradiation"]);
    assert!(b
        .external_state_variables()
        .iter()
        .all(|v| v.kind == VariableType::Scalar));
}

#[test]
fn temperature_is_not_prepended_when_exported() {
    let mut m = common::elasticity();
    m.temperature_removed_from_external_state_variables = false;
    let r = single("Elasticity", m.with_external_state_variable("Temperature", 0));
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(names(b.external_state_variables()), ["Temperature"]);
}

// ─── Contract Violations ──────────────────────────────────────

#[test]
fn two_gradients_for_a_strain_based_behaviour() {
    let m = common::elasticity()
        .with_gradient("Damage", 0)
        .with_thermodynamic_force("EnergyReleaseRate", 0);
    let r = single("Elasticity", m);
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    match kind {
        LoadErrorKind::InconsistentVariableContract(message) => assert!(message.contains("number of gradients")),
        k => panic!("unexpected error: {}", k),
    }
}

#[test]
fn unmatched_gradients_and_thermodynamic_forces() {
    let r = single("Elasticity", common::elasticity().with_gradient("Damage", 0));
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert!(matches!(kind, LoadErrorKind::InconsistentVariableContract(_)));
}

#[test]
fn unmatched_names_and_types() {
    let mut m = common::elasticity();
    m.internal_state_variables_types.push(0);
    let r = single("Elasticity", m);
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert!(matches!(kind, LoadErrorKind::InconsistentVariableContract(_)));
}

#[test]
fn wrong_gradient_name_or_type() {
    let mut m = common::elasticity();
    m.gradients_names[0] = "DeformationGradient".to_string();
    let r = single("Elasticity", m);
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert!(matches!(kind, LoadErrorKind::InconsistentVariableContract(_)));

    let mut m = common::elasticity();
    m.thermodynamic_forces_types[0] = 3;
    let r = single("Elasticity", m);
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert!(matches!(kind, LoadErrorKind::InconsistentVariableContract(_)));
}

#[test]
fn invalid_variable_type() {
    let r = single("Elasticity", common::elasticity().with_internal_state_variable("Damage", 7));
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert_eq!(
        kind,
        LoadErrorKind::InvalidVariableType {
            name: "Damage".to_string(),
            code: 7
        }
    );
}

#[test]
fn strain_based_behaviour_with_a_finite_strain_kinematic() {
    let mut m = common::elasticity();
    m.kinematic = 3;
    let r = single("Elasticity", m);
    let kind = load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional));
    assert!(matches!(kind, LoadErrorKind::InvalidKinematic(_)));
}

#[test]
fn invalid_codes() {
    let mut m = common::elasticity();
    m.behaviour_type = 9;
    let r = single("Elasticity", m);
    assert_eq!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::InvalidBehaviourType(9)
    );

    let mut m = common::elasticity();
    m.kinematic = 5;
    let r = single("Elasticity", m);
    assert!(matches!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::InvalidKinematic(_)
    ));
}

#[test]
fn entry_point_and_api_version() {
    let mut m = common::elasticity();
    m.material_knowledge_type = 0;
    let r = single("Elasticity", m);
    assert_eq!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::InvalidEntryPointKind
    );

    let mut m = common::elasticity();
    m.api_version = BEHAVIOUR_API_VERSION + 1;
    let r = single("Elasticity", m);
    assert_eq!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::UnsupportedApiVersion {
            found: BEHAVIOUR_API_VERSION + 1,
            expected: BEHAVIOUR_API_VERSION
        }
    );
}

#[test]
fn load_error_message_names_the_behaviour() {
    let mut m = common::elasticity();
    m.material_knowledge_type = 0;
    let r = single("Elasticity", m);
    let e = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap_err();
    let message = e.to_string();
    assert!(message.starts_with("load: "));
    assert!(message.contains("behaviour 'Elasticity' in library 'libBehaviour.so'"));
}

#[test]
fn unknown_behaviour_or_hypothesis() {
    let r = registry();
    assert!(matches!(
        load(&r, LIBRARY, "Plasticity", Hypothesis::Tridimensional),
        Err(BehaviourError::Library(_))
    ));
    assert!(matches!(
        load(&r, LIBRARY, "TvergaardCohesiveZoneModel", Hypothesis::Axisymmetrical),
        Err(BehaviourError::Library(_))
    ));
    assert!(matches!(
        Hypothesis::parse("ThreeDimensional"),
        Err(BehaviourError::InvalidHypothesis(_))
    ));
}

// ─── Tangent Operator Blocks ──────────────────────────────────

#[test]
fn blocks_with_internal_state_variables_and_external_state_variables() {
    let m = common::elasticity()
        .with_external_state_variable("Porosity", 0)
        .with_tangent_operator_block("ElasticStrain", "Strain")
        .with_tangent_operator_block("Stress", "Porosity");
    let r = single("Elasticity", m);
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::PlaneStrain).unwrap();
    let blocks: Vec<(&str, &str)> = b
        .tangent_operator_blocks()
        .iter()
        .map(|(n, d)| (n.name.as_str(), d.name.as_str()))
        .collect();
    assert_eq!(blocks, [("Stress", "Strain"), ("ElasticStrain", "Strain"), ("Stress", "Porosity")]);
    assert_eq!(b.tangent_operator_size(), 16 + 16 + 4);
}

#[test]
fn ambiguous_block() {
    let r = single("Elasticity", common::elasticity().with_internal_state_variable("Stress", 1));
    assert_eq!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::AmbiguousTangentOperatorBlock("Stress".to_string(), "Strain".to_string())
    );
}

#[test]
fn missing_block() {
    let r = single(
        "Elasticity",
        common::elasticity().with_tangent_operator_block("Stress", "Damage"),
    );
    assert_eq!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::MissingTangentOperatorBlock("Stress".to_string(), "Damage".to_string())
    );
    // numerators are thermodynamic forces or internal state variables
    let r = single(
        "Elasticity",
        common::elasticity().with_tangent_operator_block("Strain", "Strain"),
    );
    assert!(matches!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::MissingTangentOperatorBlock(..)
    ));
}

// ─── Finite Strain Behaviours ─────────────────────────────────

#[test]
fn finite_strain_behaviour_requires_options() {
    let r = registry();
    assert!(is_standard_finite_strain_behaviour(&r, LIBRARY, "SaintVenantKirchhoffElasticity").unwrap());
    assert!(!is_standard_finite_strain_behaviour(&r, LIBRARY, "Elasticity").unwrap());
    assert_eq!(
        load_error(load(&r, LIBRARY, "SaintVenantKirchhoffElasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::FiniteStrainOptionsRequired
    );
    let options = FiniteStrainBehaviourOptions::default();
    assert_eq!(
        load_error(load_with_options(&r, &options, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::NotAFiniteStrainBehaviour
    );
}

#[test]
fn default_options_keep_the_cauchy_stress() {
    let r = registry();
    let options = FiniteStrainBehaviourOptions::default();
    let b = load_with_options(&r, &options, LIBRARY, "SaintVenantKirchhoffElasticity", Hypothesis::Tridimensional)
        .unwrap();
    assert_eq!(b.options(), [0.0, 0.0]);
    assert_eq!(names(b.thermodynamic_forces()), ["Stress"]);
    assert_eq!(b.thermodynamic_forces_size(), 6);
    assert_eq!(b.gradients_size(), 9);
    assert_eq!(b.tangent_operator_size(), 54);
}

#[test]
fn first_piola_kirchhoff_stress() {
    let r = registry();
    let options = FiniteStrainBehaviourOptions::new(StressMeasure::PK1, TangentOperator::DPK1_DF);
    let b = load_with_options(&r, &options, LIBRARY, "SaintVenantKirchhoffElasticity", Hypothesis::Tridimensional)
        .unwrap();
    assert_eq!(b.options(), [2.0, 2.0]);
    let force = &b.thermodynamic_forces()[0];
    assert_eq!(force.name, "FirstPiolaKirchhoffStress");
    assert_eq!(force.kind, VariableType::Tensor);
    let (num, den) = &b.tangent_operator_blocks()[0];
    assert_eq!(num.name, "FirstPiolaKirchhoffStress");
    assert_eq!(den.name, "DeformationGradient");
    assert_eq!(b.thermodynamic_forces_size(), 9);
    assert_eq!(b.tangent_operator_size(), 81);
    assert!(b.rotate_thermodynamic_forces_capability().is_available());
}

#[test]
fn second_piola_kirchhoff_stress_and_kirchhoff_tangent_operator() {
    let r = registry();
    let options = FiniteStrainBehaviourOptions::new(StressMeasure::PK2, TangentOperator::DTAU_DDF);
    let b = load_with_options(&r, &options, LIBRARY, "SaintVenantKirchhoffElasticity", Hypothesis::PlaneStrain)
        .unwrap();
    assert_eq!(b.options(), [1.0, 3.0]);
    assert_eq!(b.thermodynamic_forces()[0].name, "SecondPiolaKirchhoffStress");
    let (num, den) = &b.tangent_operator_blocks()[0];
    assert_eq!(num.name, "KirchhoffStress");
    assert_eq!(num.kind, VariableType::Stensor);
    assert_eq!(num.type_code, 3);
    assert_eq!(den.name, "SpatialIncrementOfTheDeformationGradient");
    assert_eq!(b.tangent_operator_size(), 4 * 5);
}

#[test]
fn options_from_a_configuration_file() {
    let options: FiniteStrainBehaviourOptions = serde_json::from_str(r#"{ "stress_measure": "PK1" }"#).unwrap();
    assert_eq!(options.stress_measure, StressMeasure::PK1);
    assert_eq!(options.tangent_operator, TangentOperator::DSIG_DF);
    let options: FiniteStrainBehaviourOptions =
        serde_json::from_str(r#"{ "stress_measure": "CAUCHY", "tangent_operator": "DS_DEGL" }"#).unwrap();
    assert_eq!(options, FiniteStrainBehaviourOptions::new(StressMeasure::Cauchy, TangentOperator::DS_DEGL));
}

#[test]
fn eto_pk1_kinematic() {
    let mut m = BehaviourMetadata::new(symbol("LogarithmicStrainElasticity"))
        .with_gradient("Strain", 1)
        .with_thermodynamic_force("Stresss", 1)
        .with_tangent_operator_block("Stresss", "Strain");
    m.behaviour_type = 2;
    m.kinematic = 4;
    let r = single("LogarithmicStrainElasticity", m.clone());
    let b = load(
        &r,
        LIBRARY,
        "LogarithmicStrainElasticity",
        Hypothesis::AxisymmetricalGeneralisedPlaneStrain,
    )
    .unwrap();
    assert_eq!(b.kinematic(), Kinematic::FiniteStrainEtoPk1);
    assert_eq!(b.options(), [0.0, 0.0]);
    assert!(matches!(
        load_error(load(&r, LIBRARY, "LogarithmicStrainElasticity", Hypothesis::PlaneStrain)),
        LoadErrorKind::InvalidKinematic(_)
    ));

    // the thermodynamic force is expected to be exported as "Stresss"
    m.thermodynamic_forces_names[0] = "Stress".to_string();
    m.tangent_operator_blocks[0].0 = "Stress".to_string();
    let r = single("LogarithmicStrainElasticity", m);
    assert!(matches!(
        load_error(load(
            &r,
            LIBRARY,
            "LogarithmicStrainElasticity",
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain
        )),
        LoadErrorKind::InconsistentVariableContract(_)
    ));
}

#[test]
fn cohesive_zone_model() {
    let r = registry();
    let b = load(&r, LIBRARY, "TvergaardCohesiveZoneModel", Hypothesis::PlaneStrain).unwrap();
    assert_eq!(b.behaviour_type(), BehaviourType::CohesiveZoneModel);
    assert_eq!(b.kinematic(), Kinematic::CohesiveZone);
    assert_eq!(b.gradients_size(), 2);
    assert_eq!(b.tangent_operator_size(), 4);
}

// ─── Functions ────────────────────────────────────────────────

#[test]
fn initialize_functions_and_post_processings() {
    let r = registry();
    let b = load(&r, LIBRARY, "DiffusionBehaviour", Hypothesis::Tridimensional).unwrap();
    assert_eq!(b.behaviour_type(), BehaviourType::General);
    assert_eq!(names(b.external_state_variables()), ["Temperature", "Pressure"]);
    assert_eq!(b.initialize_function_variables_size("ElasticStrainFromInitialStress").unwrap(), 6);
    assert_eq!(
        b.allocate_initialize_function_variables("ElasticStrainFromInitialStress").unwrap(),
        vec![0.0; 6]
    );
    assert_eq!(b.post_processing_variables_size("PrincipalStrain").unwrap(), 4);
    assert_eq!(b.allocate_post_processing_variables("PrincipalStrain").unwrap().len(), 4);
    assert!(matches!(
        b.initialize_function_variables_size("PrincipalStrain"),
        Err(BehaviourError::UnknownFunction { .. })
    ));
    assert!(matches!(
        b.allocate_post_processing_variables("ElasticStrainFromInitialStress"),
        Err(BehaviourError::UnknownFunction { .. })
    ));
    let f = &b.initialize_functions()["ElasticStrainFromInitialStress"];
    assert_eq!(f.function.name(), "init");
    assert_eq!(b.post_processings()["PrincipalStrain"].outputs.len(), 2);
}

// ─── Parameters ───────────────────────────────────────────────

#[test]
fn parameters_are_partitioned_by_type() {
    let r = registry();
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(b.parameters(), ["epsilon"]);
    assert_eq!(b.integer_parameters(), ["iterMax"]);
    assert_eq!(b.unsigned_short_parameters(), ["numberOfSubSteps"]);
}

#[test]
fn unsupported_parameter_type() {
    let mut m = common::elasticity();
    m.parameters_names.push("theta".to_string());
    m.parameters_types.push(5);
    let r = single("Elasticity", m);
    assert_eq!(
        load_error(load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional)),
        LoadErrorKind::UnsupportedParameterType {
            name: "theta".to_string(),
            code: 5
        }
    );
}

#[test]
fn parameter_values() {
    let r = registry();
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(parameter_default_value::<_, f64>(&r, &b, "epsilon").unwrap(), 1e-14);
    assert_eq!(parameter_default_value::<_, i32>(&r, &b, "iterMax").unwrap(), 100);
    assert_eq!(parameter_default_value::<_, u16>(&r, &b, "numberOfSubSteps").unwrap(), 4);
    assert!(matches!(
        parameter_default_value::<_, f64>(&r, &b, "iterMax"),
        Err(BehaviourError::InvalidParameterValue { .. })
    ));

    set_parameter(&r, &b, "iterMax", 25i32).unwrap();
    assert_eq!(
        r.parameter_value(LIBRARY, "Elasticity", Hypothesis::Tridimensional, "iterMax").unwrap(),
        ParameterValue::Integer(25)
    );
    // other hypotheses are not affected
    assert_eq!(
        r.parameter_value(LIBRARY, "Elasticity", Hypothesis::PlaneStrain, "iterMax").unwrap(),
        ParameterValue::Integer(100)
    );
    assert!(set_parameter(&r, &b, "iterMax", 25.0).is_err());
    assert!(set_parameter(&r, &b, "theta", 0.5).is_err());
}

#[test]
fn bounds() {
    let r = registry();
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert!(has_bounds(&r, &b, "YoungModulus").unwrap());
    assert!(has_lower_bound(&r, &b, "YoungModulus").unwrap());
    assert!(!has_upper_bound(&r, &b, "YoungModulus").unwrap());
    assert_eq!(lower_bound(&r, &b, "YoungModulus").unwrap(), 0.0);
    assert!(upper_bound(&r, &b, "YoungModulus").is_err());
    assert!(!has_bounds(&r, &b, "PoissonRatio").unwrap());

    assert!(has_physical_bounds(&r, &b, "PoissonRatio").unwrap());
    assert_eq!(lower_physical_bound(&r, &b, "PoissonRatio").unwrap(), -1.0);
    assert_eq!(upper_physical_bound(&r, &b, "PoissonRatio").unwrap(), 0.5);
    assert!(!has_physical_bounds(&r, &b, "YoungModulus").unwrap());
}

// ─── Provenance ───────────────────────────────────────────────

#[test]
fn provenance() {
    let mut m = common::elasticity();
    m.tfel_version = "4.2.0".to_string();
    m.unit_system = "SI".to_string();
    m.source = "Elasticity.mfront".to_string();
    let r = single("Elasticity", m);
    let b = load(&r, LIBRARY, "Elasticity", Hypothesis::Tridimensional).unwrap();
    assert_eq!(b.tfel_version(), "4.2.0");
    assert_eq!(b.unit_system(), "SI");
    assert_eq!(b.source(), "Elasticity.mfront");
    assert_eq!(r.api_version(LIBRARY, "Elasticity").unwrap(), BEHAVIOUR_API_VERSION);
}

//! Construction of behaviour descriptors from the metadata exported by a
//! behaviour library.

use std::collections::BTreeMap;

use crate::behaviour::{
    Behaviour, BehaviourInitializeFunction, BehaviourPostProcessing, BehaviourType, Kinematic,
    RotationCapability, Symmetry,
};
use crate::error::{BehaviourError, LoadErrorKind, Result};
use crate::finite_strain::FiniteStrainBehaviourOptions;
use crate::hypothesis::Hypothesis;
use crate::interfaces::{BehaviourResolver, ParameterType};
use crate::variable::{Variable, VariableType};
use crate::BEHAVIOUR_API_VERSION;

/// Returns `true` for finite strain behaviours based on the F-Cauchy
/// kinematic. Those must be loaded with [`load_with_options`].
pub fn is_standard_finite_strain_behaviour<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    library: &str,
    behaviour: &str,
) -> Result<bool> {
    Ok(resolver.behaviour_type(library, behaviour)? == 2
        && resolver.behaviour_kinematic(library, behaviour)? == 3)
}

/// Loads a behaviour that is not a standard finite strain behaviour.
pub fn load<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    library: &str,
    behaviour: &str,
    hypothesis: Hypothesis,
) -> Result<Behaviour> {
    let loader = Loader::new(resolver, library, behaviour, hypothesis);
    if is_standard_finite_strain_behaviour(resolver, library, behaviour)? {
        return Err(loader.fail(LoadErrorKind::FiniteStrainOptionsRequired));
    }
    let mut d = loader.load_behaviour()?;
    if d.symmetry == Symmetry::Orthotropic {
        loader.attach_rotations(&mut d, None)?;
    }
    tracing::debug!(library, behaviour, %hypothesis, kind = %d.behaviour_type, "behaviour loaded");
    Ok(d)
}

/// Loads a finite strain behaviour, selecting its stress measure and tangent
/// operator.
pub fn load_with_options<R: BehaviourResolver + ?Sized>(
    resolver: &R,
    options: &FiniteStrainBehaviourOptions,
    library: &str,
    behaviour: &str,
    hypothesis: Hypothesis,
) -> Result<Behaviour> {
    let loader = Loader::new(resolver, library, behaviour, hypothesis);
    let mut d = loader.load_behaviour()?;
    if d.behaviour_type != BehaviourType::StandardFiniteStrain {
        return Err(loader.fail(LoadErrorKind::NotAFiniteStrainBehaviour));
    }
    loader.apply_finite_strain_options(&mut d, options)?;
    if d.symmetry == Symmetry::Orthotropic {
        loader.attach_rotations(&mut d, Some(options))?;
    }
    tracing::debug!(
        library,
        behaviour,
        %hypothesis,
        stress_measure = %options.stress_measure,
        tangent_operator = %options.tangent_operator,
        "finite strain behaviour loaded"
    );
    Ok(d)
}

struct Loader<'a, R: ?Sized> {
    resolver: &'a R,
    library: &'a str,
    behaviour: &'a str,
    hypothesis: Hypothesis,
}

impl<'a, R: BehaviourResolver + ?Sized> Loader<'a, R> {
    fn new(resolver: &'a R, library: &'a str, behaviour: &'a str, hypothesis: Hypothesis) -> Self {
        Self {
            resolver,
            library,
            behaviour,
            hypothesis,
        }
    }

    fn fail(&self, kind: LoadErrorKind) -> BehaviourError {
        BehaviourError::Load {
            library: self.library.to_string(),
            behaviour: self.behaviour.to_string(),
            kind,
        }
    }

    fn contract(&self, message: impl Into<String>) -> BehaviourError {
        self.fail(LoadErrorKind::InconsistentVariableContract(message.into()))
    }

    fn invalid_kinematic(&self, message: &str) -> BehaviourError {
        self.fail(LoadErrorKind::InvalidKinematic(message.to_string()))
    }

    /// Builds a list of variables from parallel arrays of names and types.
    fn variables(&self, what: &str, names: Vec<String>, types: Vec<i32>) -> Result<Vec<Variable>> {
        if names.len() != types.len() {
            return Err(self.contract(format!(
                "the number of {} names ({}) does not match the number of {} types ({})",
                what,
                names.len(),
                what,
                types.len()
            )));
        }
        names
            .into_iter()
            .zip(types)
            .map(|(name, code)| match VariableType::from_code(code) {
                Some(kind) => Ok(Variable::new(name, kind, code)),
                None => Err(self.fail(LoadErrorKind::InvalidVariableType { name, code })),
            })
            .collect()
    }

    fn load_behaviour(&self) -> Result<Behaviour> {
        let (r, l, b, h) = (self.resolver, self.library, self.behaviour, self.hypothesis);
        tracing::debug!(library = l, behaviour = b, hypothesis = %h, "loading behaviour");
        let symbol = r.behaviour(l, b, h)?;
        if r.material_knowledge_type(l, b)? != 1 {
            return Err(self.fail(LoadErrorKind::InvalidEntryPointKind));
        }
        let api_version = r.api_version(l, b)?;
        if api_version != BEHAVIOUR_API_VERSION {
            return Err(self.fail(LoadErrorKind::UnsupportedApiVersion {
                found: api_version,
                expected: BEHAVIOUR_API_VERSION,
            }));
        }
        let btype = r.behaviour_type(l, b)?;
        let behaviour_type = BehaviourType::from_code(btype)
            .ok_or_else(|| self.fail(LoadErrorKind::InvalidBehaviourType(btype)))?;
        let kinematic = self.kinematic()?;

        let gradients = self.variables("gradients", r.gradients_names(l, b, h)?, r.gradients_types(l, b, h)?)?;
        let thermodynamic_forces = self.variables(
            "thermodynamic forces",
            r.thermodynamic_forces_names(l, b, h)?,
            r.thermodynamic_forces_types(l, b, h)?,
        )?;
        if gradients.len() != thermodynamic_forces.len() {
            return Err(self.contract(format!(
                "the number of the gradients ({}) does not match the number of thermodynamic forces ({})",
                gradients.len(),
                thermodynamic_forces.len()
            )));
        }
        self.check_gradients_and_thermodynamic_forces(
            behaviour_type,
            kinematic,
            &gradients,
            &thermodynamic_forces,
        )?;

        let symmetry = if r.behaviour_symmetry(l, b)? == 0 {
            Symmetry::Isotropic
        } else {
            Symmetry::Orthotropic
        };
        let material_properties = self.material_properties(symmetry)?;
        let internal_state_variables = self.variables(
            "internal state variables",
            r.internal_state_variables_names(l, b, h)?,
            r.internal_state_variables_types(l, b, h)?,
        )?;
        let external_state_variables = self.external_state_variables()?;

        let mut d = Behaviour {
            library: l.to_string(),
            behaviour: b.to_string(),
            function: format!("{}_{}", b, h),
            hypothesis: h,
            symbol,
            tfel_version: r.tfel_version(l, b)?,
            unit_system: r.unit_system(l, b)?,
            source: r.source(l, b)?,
            behaviour_type,
            kinematic,
            symmetry,
            gradients,
            thermodynamic_forces,
            material_properties,
            internal_state_variables,
            external_state_variables,
            parameters: Vec::new(),
            integer_parameters: Vec::new(),
            unsigned_short_parameters: Vec::new(),
            tangent_operator_blocks: Vec::new(),
            computes_stored_energy: r.computes_stored_energy(l, b, h)?,
            computes_dissipated_energy: r.computes_dissipated_energy(l, b, h)?,
            options: Vec::new(),
            rotate_gradients: RotationCapability::Unavailable,
            rotate_thermodynamic_forces: RotationCapability::Unavailable,
            rotate_tangent_operator_blocks: RotationCapability::Unavailable,
            initialize_functions: BTreeMap::new(),
            post_processings: BTreeMap::new(),
        };
        for (num, den) in r.tangent_operator_blocks_names(l, b, h)? {
            let block = self.tangent_operator_block(&d, &num, &den)?;
            d.tangent_operator_blocks.push(block);
        }
        self.partition_parameters(&mut d)?;
        self.functions(&mut d)?;
        if behaviour_type == BehaviourType::StandardFiniteStrain {
            d.options = vec![0.0; 2];
        }
        Ok(d)
    }

    fn kinematic(&self) -> Result<Kinematic> {
        let code = self.resolver.behaviour_kinematic(self.library, self.behaviour)?;
        let kinematic = Kinematic::from_code(code)
            .ok_or_else(|| self.invalid_kinematic(&format!("unsupported behaviour kinematic ({})", code)))?;
        if kinematic == Kinematic::FiniteStrainEtoPk1 && !self.hypothesis.is_axisymmetrical_generalised() {
            return Err(self.invalid_kinematic("invalid hypothesis for behaviour based on the eto-pk1 kinematic"));
        }
        Ok(kinematic)
    }

    fn check_gradients_and_thermodynamic_forces(
        &self,
        behaviour_type: BehaviourType,
        kinematic: Kinematic,
        gradients: &[Variable],
        thermodynamic_forces: &[Variable],
    ) -> Result<()> {
        use Kinematic as K;
        let expected = match (behaviour_type, kinematic) {
            (BehaviourType::General, _) => return Ok(()),
            (BehaviourType::StandardStrainBased, K::SmallStrain) => {
                (("Strain", VariableType::Stensor), ("Stress", VariableType::Stensor))
            }
            (
                BehaviourType::StandardStrainBased,
                K::Undefined | K::CohesiveZone | K::FiniteStrainFCauchy | K::FiniteStrainEtoPk1,
            ) => {
                return Err(self.invalid_kinematic(
                    "strain based behaviour must be associated with the small strain kinematic hypothesis",
                ))
            }
            (BehaviourType::CohesiveZoneModel, K::CohesiveZone) => (
                ("OpeningDisplacement", VariableType::Vector),
                ("CohesiveForce", VariableType::Vector),
            ),
            (
                BehaviourType::CohesiveZoneModel,
                K::Undefined | K::SmallStrain | K::FiniteStrainFCauchy | K::FiniteStrainEtoPk1,
            ) => return Err(self.invalid_kinematic("invalid kinematic assumption for cohesive zone model")),
            (BehaviourType::StandardFiniteStrain, K::FiniteStrainFCauchy) => (
                ("DeformationGradient", VariableType::Tensor),
                ("Stress", VariableType::Stensor),
            ),
            (BehaviourType::StandardFiniteStrain, K::FiniteStrainEtoPk1) => {
                if !self.hypothesis.is_axisymmetrical_generalised() {
                    return Err(
                        self.invalid_kinematic("invalid hypothesis for behaviour based on the eto-pk1 kinematic")
                    );
                }
                // "Stresss" is the name exported by eto-pk1 behaviours
                (("Strain", VariableType::Stensor), ("Stresss", VariableType::Stensor))
            }
            (BehaviourType::StandardFiniteStrain, K::Undefined | K::SmallStrain | K::CohesiveZone) => {
                return Err(self.invalid_kinematic("invalid kinematic hypothesis for finite strain behaviour"))
            }
        };
        let ((gname, gkind), (tname, tkind)) = expected;
        if gradients.len() != 1 {
            return Err(self.contract(format!("invalid number of gradients ({}), expected 1", gradients.len())));
        }
        let (g, t) = (&gradients[0], &thermodynamic_forces[0]);
        if g.name != gname {
            return Err(self.contract(format!("invalid gradient name '{}', expected '{}'", g.name, gname)));
        }
        if g.kind != gkind {
            return Err(self.contract(format!("invalid gradient type {} for '{}', expected {}", g.kind, g.name, gkind)));
        }
        if t.name != tname {
            return Err(self.contract(format!(
                "invalid thermodynamic force name '{}', expected '{}'",
                t.name, tname
            )));
        }
        if t.kind != tkind {
            return Err(self.contract(format!(
                "invalid thermodynamic force type {} for '{}', expected {}",
                t.kind, t.name, tkind
            )));
        }
        Ok(())
    }

    fn material_properties(&self, symmetry: Symmetry) -> Result<Vec<Variable>> {
        let (r, l, b, h) = (self.resolver, self.library, self.behaviour, self.hypothesis);
        let mut names: Vec<&str> = Vec::new();
        if r.requires_stiffness_tensor(l, b, h)? {
            if r.elastic_stiffness_symmetry(l, b)? == 0 {
                names.extend(["YoungModulus", "PoissonRatio"]);
            } else {
                if symmetry != Symmetry::Orthotropic {
                    return Err(self.contract(
                        "the behaviour must be orthotropic for the elastic stiffness symmetry to be orthotropic",
                    ));
                }
                names.extend([
                    "YoungModulus1",
                    "YoungModulus2",
                    "YoungModulus3",
                    "PoissonRatio12",
                    "PoissonRatio23",
                    "PoissonRatio13",
                ]);
                match h.space_dimension() {
                    1 => {}
                    2 => names.push("ShearModulus12"),
                    _ => names.extend(["ShearModulus12", "ShearModulus23", "ShearModulus13"]),
                }
            }
        }
        if r.requires_thermal_expansion_coefficient_tensor(l, b, h)? {
            match symmetry {
                Symmetry::Orthotropic => {
                    names.extend(["ThermalExpansion1", "ThermalExpansion2", "ThermalExpansion3"])
                }
                Symmetry::Isotropic => names.push("ThermalExpansion"),
            }
        }
        let mut mps: Vec<Variable> = names.into_iter().map(Variable::scalar).collect();
        mps.extend(r.material_properties_names(l, b, h)?.into_iter().map(Variable::scalar));
        Ok(mps)
    }

    fn external_state_variables(&self) -> Result<Vec<Variable>> {
        let (r, l, b, h) = (self.resolver, self.library, self.behaviour, self.hypothesis);
        let mut esvs = Vec::new();
        if r.has_temperature_been_removed_from_external_state_variables(l, b)? {
            esvs.push(Variable::scalar("Temperature"));
        }
        if r.has_external_state_variables_types(l, b, h)? {
            esvs.extend(self.variables(
                "external state variables",
                r.external_state_variables_names(l, b, h)?,
                r.external_state_variables_types(l, b, h)?,
            )?);
        } else {
            tracing::debug!(
                library = l,
                behaviour = b,
                "no types exported for the external state variables, assuming scalars"
            );
            esvs.extend(r.external_state_variables_names(l, b, h)?.into_iter().map(Variable::scalar));
        }
        Ok(esvs)
    }

    fn tangent_operator_block(&self, d: &Behaviour, num: &str, den: &str) -> Result<(Variable, Variable)> {
        let numerators = d.thermodynamic_forces.iter().chain(&d.internal_state_variables);
        let mut found: Option<(Variable, Variable)> = None;
        for v1 in numerators {
            if v1.name != num {
                continue;
            }
            for v2 in d.gradients.iter().chain(&d.external_state_variables) {
                if v2.name != den {
                    continue;
                }
                if found.is_some() {
                    return Err(self.fail(LoadErrorKind::AmbiguousTangentOperatorBlock(
                        num.to_string(),
                        den.to_string(),
                    )));
                }
                found = Some((v1.clone(), v2.clone()));
            }
        }
        found.ok_or_else(|| {
            self.fail(LoadErrorKind::MissingTangentOperatorBlock(
                num.to_string(),
                den.to_string(),
            ))
        })
    }

    fn partition_parameters(&self, d: &mut Behaviour) -> Result<()> {
        let (r, l, b, h) = (self.resolver, self.library, self.behaviour, self.hypothesis);
        let names = r.parameters_names(l, b, h)?;
        let types = r.parameters_types(l, b, h)?;
        if names.len() != types.len() {
            return Err(self.contract(format!(
                "inconsistent size between parameters' names ({}) and parameters' types ({})",
                names.len(),
                types.len()
            )));
        }
        for (name, code) in names.into_iter().zip(types) {
            match ParameterType::from_code(code) {
                Some(ParameterType::Real) => d.parameters.push(name),
                Some(ParameterType::Integer) => d.integer_parameters.push(name),
                Some(ParameterType::UnsignedShort) => d.unsigned_short_parameters.push(name),
                None => return Err(self.fail(LoadErrorKind::UnsupportedParameterType { name, code })),
            }
        }
        Ok(())
    }

    fn functions(&self, d: &mut Behaviour) -> Result<()> {
        let (r, l, b, h) = (self.resolver, self.library, self.behaviour, self.hypothesis);
        for name in r.initialize_functions(l, b, h)? {
            let f = BehaviourInitializeFunction {
                function: r.initialize_function(l, b, &name, h)?,
                inputs: self.variables(
                    "initialize function inputs",
                    r.initialize_function_inputs_names(l, b, &name, h)?,
                    r.initialize_function_inputs_types(l, b, &name, h)?,
                )?,
            };
            d.initialize_functions.insert(name, f);
        }
        for name in r.post_processings(l, b, h)? {
            let p = BehaviourPostProcessing {
                function: r.post_processing(l, b, &name, h)?,
                outputs: self.variables(
                    "post-processing outputs",
                    r.post_processing_outputs_names(l, b, &name, h)?,
                    r.post_processing_outputs_types(l, b, &name, h)?,
                )?,
            };
            d.post_processings.insert(name, p);
        }
        Ok(())
    }

    fn apply_finite_strain_options(&self, d: &mut Behaviour, o: &FiniteStrainBehaviourOptions) -> Result<()> {
        let internal = |what: &str| self.fail(LoadErrorKind::Internal(format!("no {} to redefine", what)));
        d.options = vec![0.0; 2];
        d.options[0] = f64::from(o.stress_measure.code());
        if let Some(force) = o.stress_measure.thermodynamic_force() {
            *d.thermodynamic_forces
                .first_mut()
                .ok_or_else(|| internal("thermodynamic force"))? = force;
        }
        d.options[1] = f64::from(o.tangent_operator.code());
        if let Some(block) = o.tangent_operator.block() {
            *d.tangent_operator_blocks
                .first_mut()
                .ok_or_else(|| internal("tangent operator block"))? = block;
        }
        Ok(())
    }

    fn attach_rotations(&self, d: &mut Behaviour, options: Option<&FiniteStrainBehaviourOptions>) -> Result<()> {
        let (r, l, b, h) = (self.resolver, self.library, self.behaviour, self.hypothesis);
        let stress_measure = options.map(|o| o.stress_measure);
        let tangent_operator = options.map(|o| o.tangent_operator);
        d.rotate_gradients = RotationCapability::Available {
            single: r.rotate_gradients_function(l, b, h)?,
            batched: r.rotate_array_of_gradients_function(l, b, h)?,
        };
        d.rotate_thermodynamic_forces = RotationCapability::Available {
            single: r.rotate_thermodynamic_forces_function(l, b, h, stress_measure)?,
            batched: r.rotate_array_of_thermodynamic_forces_function(l, b, h, stress_measure)?,
        };
        d.rotate_tangent_operator_blocks = RotationCapability::Available {
            single: r.rotate_tangent_operator_blocks_function(l, b, h, tangent_operator)?,
            batched: r.rotate_array_of_tangent_operator_blocks_function(l, b, h, tangent_operator)?,
        };
        Ok(())
    }
}

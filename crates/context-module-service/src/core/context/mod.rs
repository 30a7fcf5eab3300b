use crate::core::context::configuration::{Configuration, Profile};
use crate::core::context::environment::{VariablesResolver, ENVIRONMENT_PREFIX};
use crate::core::Error;

pub mod configuration;
pub mod environment;

#[derive(Clone)]
pub struct Context {
    pub configuration: Configuration,
}

impl Context {
    pub fn new(configuration: Configuration) -> Context {
        Context { configuration }
    }

    /// Build the configuration from the profile file named by
    /// `CONTEXT_MODULE_PROFILE`, overridden by the other `CONTEXT_MODULE_*` variables.
    pub fn load() -> Result<Self, Error> {
        let mut complete_profile = Profile::empty();

        let resolver = VariablesResolver::initialize()?;
        let mut environment = resolver.resolve_environment()?;

        let profile_path = environment.remove("profile");
        let profile_path = profile_path.as_ref().and_then(|x| x.as_str()).filter(|x| !x.is_empty());

        if profile_path.is_none() {
            eprintln!("No profile file specified with {}PROFILE, using defaults and environment variables.", ENVIRONMENT_PREFIX);
        }

        let profile = profile_path.map(Profile::from_file).unwrap_or(Ok(Profile::empty()))?;

        complete_profile.merge(&profile);
        complete_profile.insert_variables(environment)?;

        Configuration::from_profile(&complete_profile).map(Self::new)
    }
}

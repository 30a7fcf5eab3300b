use std::fs;
use std::str::FromStr;

use context_module_nft::datasource::Configuration as DataSourceConfiguration;
use context_module_nft::model::LoaderOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::context::environment::{JSONPath, Variables};
use crate::core::Error;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbosityConfiguration {
    Debug,
    #[default]
    Info,
}

impl FromStr for VerbosityConfiguration {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(VerbosityConfiguration::Debug),
            _ => Ok(VerbosityConfiguration::Info),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub verbosity: VerbosityConfiguration,

    /// Chain the transactions are loaded for.
    #[serde(default = "Configuration::default_chain_id")]
    pub chain_id: u64,

    #[serde(default)]
    pub data_source: DataSourceConfiguration,
}

impl Configuration {
    fn default_chain_id() -> u64 {
        1
    }

    pub fn from_profile(profile: &Profile) -> Result<Self, Error> {
        serde_json::from_value(Value::Object(profile.0.clone())).map_err(|e| Error::Configuration(e.to_string()))
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions::new(self.chain_id)
    }
}

/// Raw configuration tree, merged from a profile file and the environment
/// before being deserialized into a [`Configuration`].
#[derive(Clone, Debug, Deserialize)]
pub struct Profile(Map<String, Value>);

impl Profile {
    pub fn empty() -> Self {
        Self(Map::new())
    }

    pub fn from_file(path: &str) -> Result<Self, Error> {
        let data = fs::read(path).map_err(|e| Error::Configuration(format!("{}: {}", path, e)))?;
        let variables: Map<String, Value> = serde_json::from_slice(&data).map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self(variables))
    }

    pub fn merge(&mut self, profile: &Profile) {
        #[rustfmt::skip]
        fn merge_rec(profile: &mut Map<String, Value>, other: &Map<String, Value>) {
            for (k, v) in other {
                match (profile.get_mut(k), v) {
                    (Some(Value::Object(a_obj)), Value::Object(b_obj)) => { merge_rec(a_obj, b_obj); },
                    _ => { profile.insert(k.clone(), v.clone()); },
                }
            }
        }

        merge_rec(&mut self.0, &profile.0)
    }

    pub fn insert_variables(&mut self, variables: Variables) -> Result<(), Error> {
        for (key, value) in variables.into_iter() {
            self.insert_variable(key, value)?
        }

        Ok(())
    }

    pub fn insert_variable(&mut self, path: JSONPath, value: Value) -> Result<(), Error> {
        fn insert_rec(object: &mut Map<String, Value>, path: &[String], value: Value) -> Result<(), Error> {
            let [head, tail @ ..] = path else {
                return Err(Error::Configuration("empty variable path".to_string()));
            };

            if tail.is_empty() {
                object.insert(head.to_string(), value);
                return Ok(());
            }

            let inner = object
                .entry(head.to_string())
                .or_insert(Value::Object(Map::new()))
                .as_object_mut()
                .ok_or(Error::Configuration(format!("could not merge variable {} in configuration", head)))?;

            insert_rec(inner, tail, value)
        }

        insert_rec(&mut self.0, &path, value)
    }
}

#[cfg(test)]
mod tests {
    use context_module_nft::datasource::Configuration as DataSourceConfiguration;
    use serde_json::{json, Map, Value};

    use super::*;

    fn profile(value: Value) -> Profile {
        Profile(serde_json::from_value::<Map<String, Value>>(value).unwrap())
    }

    #[test]
    fn verbosity_from_str() {
        assert!(matches!(VerbosityConfiguration::from_str("debug"), Ok(VerbosityConfiguration::Debug)));
        assert!(matches!(VerbosityConfiguration::from_str("info"), Ok(VerbosityConfiguration::Info)));
        assert!(matches!(VerbosityConfiguration::from_str("unknown"), Ok(VerbosityConfiguration::Info)));
    }

    #[test]
    fn empty_profile_uses_defaults() {
        let configuration = Configuration::from_profile(&Profile::empty()).unwrap();

        assert!(matches!(configuration.verbosity, VerbosityConfiguration::Info));
        assert_eq!(configuration.loader_options(), LoaderOptions::new(1));
        match configuration.data_source {
            DataSourceConfiguration::Http(x) => assert_eq!(x.endpoint, "https://nft.api.live.ledger.com/v1"),
            #[allow(unreachable_patterns)]
            _ => panic!("expected http data source"),
        }
    }

    #[test]
    fn merged_profile_overrides_nested_values() {
        let mut base = profile(json!({
            "verbosity": "debug",
            "chain_id": 1,
            "data_source": { "provider": "http", "endpoint": "http://localhost:1", "timeout": 3 }
        }));
        base.merge(&profile(json!({ "chain_id": 137, "data_source": { "timeout": 10 } })));

        let configuration = Configuration::from_profile(&base).unwrap();

        assert!(matches!(configuration.verbosity, VerbosityConfiguration::Debug));
        assert_eq!(configuration.chain_id, 137);
        match configuration.data_source {
            DataSourceConfiguration::Http(x) => {
                assert_eq!(x.endpoint, "http://localhost:1");
                assert_eq!(x.timeout, 10);
            },
            #[allow(unreachable_patterns)]
            _ => panic!("expected http data source"),
        }
    }

    #[test]
    fn insert_is_working_properly() {
        let expected = profile(json!({
            "chain_id": 10,
            "data_source": {
                "provider": "http",
                "cache": { "validity": 5 }
            }
        }));

        let mut result = Profile::empty();
        result.insert_variable(JSONPath::from_str("chain_id"), json!(10)).unwrap();
        result.insert_variable(JSONPath::from_str("data_source.provider"), json!("http")).unwrap();
        result.insert_variable(JSONPath::from_str("data_source.cache.validity"), json!(5)).unwrap();

        assert_eq!(result.0, expected.0);
    }

    #[test]
    fn insert_fails_through_scalar() {
        let mut result = profile(json!({ "chain_id": 10 }));

        assert!(result.insert_variable(JSONPath::from_str("chain_id.inner"), json!(1)).is_err());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let result = Configuration::from_profile(&profile(json!({ "data_source": { "provider": "ipfs" } })));

        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}

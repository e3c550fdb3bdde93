//! Parses the declarative method-rules resource into method descriptors.
//!
//! The resource is a JSON array of `{pattern, method}` rules. The parameter
//! name is the final segment of the pattern; the cardinality follows from
//! the method verb. Any malformed rule is fatal to the whole build.

use flowdoc_api::{Cardinality, MethodDescriptor};
use flowdoc_plugin::{MethodRulesSource, RulesError};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawRule {
    pattern: String,
    method: String,
}

/// Stock rules of the shipped framework, used when no resource is supplied.
const STOCK_RULES: &[(&str, &str)] = &[
    ("*/adapter", "registerAdapter"),
    ("*/receiver", "registerReceiver"),
    ("*/listener", "setListener"),
    ("*/errorSender", "setErrorSender"),
    ("*/errorStorage", "setErrorStorage"),
    ("*/messageLog", "setMessageLog"),
    ("*/sender", "setSender"),
    ("*/pipeline", "registerPipeLine"),
    ("*/pipe", "addPipe"),
    ("*/inputValidator", "setInputValidator"),
    ("*/outputValidator", "setOutputValidator"),
    ("*/inputWrapper", "setInputWrapper"),
    ("*/outputWrapper", "setOutputWrapper"),
    ("*/cache", "registerCache"),
    ("*/locker", "setLocker"),
    ("*/exit", "registerPipeLineExit"),
    ("*/forward", "registerForward"),
    ("*/param", "addParam"),
    ("*/job", "registerScheduledJob"),
    ("*/directoryCleaner", "addDirectoryCleaner"),
];

fn descriptor_from_rule(pattern: &str, method: &str) -> Result<MethodDescriptor, RulesError> {
    let parameter = pattern
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && *segment != "*")
        .ok_or_else(|| RulesError::Malformed(format!("pattern has no parameter segment: {pattern}")))?;
    let max_occurs = if method.starts_with("set") {
        Cardinality::ONE
    } else if method.starts_with("add") || method.starts_with("register") {
        Cardinality::Unbounded
    } else {
        return Err(RulesError::Malformed(format!(
            "method {method} has no set/add/register verb"
        )));
    };
    Ok(MethodDescriptor::new(method, parameter, max_occurs))
}

fn validate(descriptors: Vec<MethodDescriptor>) -> Result<Vec<MethodDescriptor>, RulesError> {
    let mut seen = BTreeSet::new();
    for descriptor in &descriptors {
        if !seen.insert(descriptor.method_name.clone()) {
            return Err(RulesError::Malformed(format!(
                "duplicate rule for method {}",
                descriptor.method_name
            )));
        }
    }
    Ok(descriptors)
}

/// Parse the JSON rules text, preserving rule order.
pub fn parse_rules(json: &str) -> Result<Vec<MethodDescriptor>, RulesError> {
    let raw: Vec<RawRule> =
        serde_json::from_str(json).map_err(|e| RulesError::Malformed(e.to_string()))?;
    let descriptors = raw
        .iter()
        .map(|rule| descriptor_from_rule(&rule.pattern, &rule.method))
        .collect::<Result<Vec<_>, _>>()?;
    validate(descriptors)
}

/// The framework's built-in rule set.
pub fn stock_rules() -> Vec<MethodDescriptor> {
    STOCK_RULES
        .iter()
        .map(|(pattern, method)| {
            descriptor_from_rule(pattern, method).expect("stock rules are well formed")
        })
        .collect()
}

/// [`MethodRulesSource`] over a JSON file, or the stock rules when no path
/// is configured.
#[derive(Debug, Default)]
pub struct JsonMethodRules {
    path: Option<PathBuf>,
}

impl JsonMethodRules {
    pub fn stock() -> Self {
        Self { path: None }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }
}

impl MethodRulesSource for JsonMethodRules {
    fn load(&self) -> Result<Vec<MethodDescriptor>, RulesError> {
        match &self.path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                parse_rules(&text)
            }
            None => validate(stock_rules()),
        }
    }
}

//! Static policy data steering classification and composition.
//!
//! None of this is derived from introspection; it is configuration that
//! encodes the framework's known irregularities. The stock `Default` values
//! match the shipped framework.

use flowdoc_api::StructuralRole;
use std::collections::BTreeSet;

/// One (owner-name-fragment, child-group-singular) pair suppressing a choice
/// node that two structural roles would otherwise both claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePair {
    pub owner_fragment: String,
    pub child_singular: String,
}

/// Ordered weight rule: methods matching `method` sort before unweighted
/// ones, higher weights first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRule {
    pub method: String,
    pub weight: i32,
}

impl SortRule {
    fn new(method: &str, weight: i32) -> Self {
        Self {
            method: method.to_string(),
            weight,
        }
    }
}

/// Per-context ordered weight rule lists. Selected once per component by its
/// structural role.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortRules {
    pub top_level_container: Vec<SortRule>,
    pub sub_container: Vec<SortRule>,
    pub pipeline_container: Vec<SortRule>,
    pub default: Vec<SortRule>,
}

impl SortRules {
    pub fn for_role(&self, role: StructuralRole) -> &[SortRule] {
        match role {
            StructuralRole::TopLevelContainer => &self.top_level_container,
            StructuralRole::SubContainer => &self.sub_container,
            StructuralRole::PipelineContainer => &self.pipeline_container,
            StructuralRole::Default => &self.default,
        }
    }

    pub fn weight_of(rules: &[SortRule], method: &str) -> Option<i32> {
        rules.iter().find(|r| r.method == method).map(|r| r.weight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTables {
    /// Regex patterns suppressing discovered types.
    pub exclude_filters: Vec<String>,
    /// Choice suppression pairs.
    pub ignores: Vec<IgnorePair>,
    /// Owner-name suffixes under which the `name` attribute is meaningless.
    pub exclude_name_attribute: Vec<String>,
    /// Method names whose direct reference is forced to maxOccurs 1.
    pub max_occurs_to_one: BTreeSet<String>,
    /// Owner names whose matched choice nodes are forced to unbounded.
    pub max_occurs_to_unbounded: BTreeSet<String>,
    pub sort_rules: SortRules,
    /// (owner semantic name, partner semantic name) property-copy pairs.
    pub copy_properties: Vec<(String, String)>,
}

impl Default for OverrideTables {
    fn default() -> Self {
        let exclude_filters = vec![
            // Types whose registration clashes with an existing, non-compatible
            // definition of the same name.
            r"org\.flow\.extensions\.esb\.WsdlGeneratorPipe".to_string(),
            r"org\.flow\.extensions\.ifsa\.IfsaRequesterSender".to_string(),
            r"org\.flow\.extensions\.ifsa\.IfsaProviderListener".to_string(),
            r"org\.flow\.extensions\.sap\.jco2\.SapSender".to_string(),
            r"org\.flow\.extensions\.sap\.jco2\.SapListener".to_string(),
            r"org\.flow\.extensions\.sap\.jco3\.SapSender".to_string(),
            r"org\.flow\.extensions\.sap\.jco3\.SapListener".to_string(),
            r"org\.flow\.pipes\.CommandSender".to_string(),
            r"org\.flow\.pipes\.EchoSender".to_string(),
            r"org\.flow\.pipes\.FixedResultSender".to_string(),
            r"org\.flow\.pipes\.LogSender".to_string(),
            r"org\.flow\.pipes\.MailSender".to_string(),
            r".*\.StoreSummaryQuerySender".to_string(),
            // Not usable directly in configurations.
            r"org\.flow\.pipes\.MessageSendingPipe".to_string(),
        ];

        let ignores = vec![
            // Registering a sender on a listener is a legacy construction.
            IgnorePair {
                owner_fragment: "Listener".to_string(),
                child_singular: "Sender".to_string(),
            },
        ];

        let exclude_name_attribute =
            vec!["putValidator".to_string(), "putWrapper".to_string()];

        let mut max_occurs_to_one = BTreeSet::new();
        // Until registerPipeLine is renamed to setPipeLine.
        max_occurs_to_one.insert("registerPipeLine".to_string());

        let mut max_occurs_to_unbounded = BTreeSet::new();
        // ParallelSenders accumulates senders through setSender; until that
        // method is renamed to addSender.
        max_occurs_to_unbounded.insert("parallelSendersSender".to_string());

        let sort_rules = SortRules {
            top_level_container: vec![SortRule::new("registerReceiver", 100)],
            sub_container: vec![
                SortRule::new("setListener", 100),
                SortRule::new("setErrorSender", 90),
                SortRule::new("setErrorStorage", 80),
                SortRule::new("setMessageLog", 70),
                SortRule::new("setSender", 60),
            ],
            pipeline_container: vec![
                SortRule::new("registerCache", 100),
                SortRule::new("setLocker", 90),
                SortRule::new("setInputValidator", 80),
                SortRule::new("setInputWrapper", 70),
                SortRule::new("addPipe", 60),
                SortRule::new("registerPipeLineExit", 50),
                SortRule::new("setOutputWrapper", 40),
                SortRule::new("setOutputValidator", 30),
            ],
            default: vec![
                SortRule::new("registerCache", 100),
                SortRule::new("setLocker", 90),
                SortRule::new("setInputWrapper", 80),
                SortRule::new("setInputValidator", 70),
                SortRule::new("setSender", 60),
                SortRule::new("setListener", 50),
                SortRule::new("setMessageLog", 40),
                SortRule::new("setOutputValidator", 30),
                SortRule::new("setOutputWrapper", 20),
            ],
        };

        // FileSender extends the shared file handler, which FilePipe cannot
        // reuse by composition.
        let copy_properties = vec![("FilePipe".to_string(), "FileSender".to_string())];

        Self {
            exclude_filters,
            ignores,
            exclude_name_attribute,
            max_occurs_to_one,
            max_occurs_to_unbounded,
            sort_rules,
            copy_properties,
        }
    }
}

impl OverrideTables {
    /// True when a choice for `child_singular` under `owner_name` must be
    /// suppressed.
    pub fn is_ignored(&self, owner_name: &str, child_singular: &str) -> bool {
        self.ignores.iter().any(|pair| {
            owner_name.contains(&pair.owner_fragment) && child_singular == pair.child_singular
        })
    }

    /// True when the `name` attribute must be suppressed for this owner.
    pub fn suppresses_name_attribute(&self, owner_name: &str) -> bool {
        self.exclude_name_attribute
            .iter()
            .any(|suffix| owner_name.ends_with(suffix))
    }

    /// The configured property-copy partner for an owner, if any.
    pub fn copy_partner(&self, owner_name: &str) -> Option<&str> {
        self.copy_properties
            .iter()
            .find(|(owner, _)| owner == owner_name)
            .map(|(_, partner)| partner.as_str())
    }
}

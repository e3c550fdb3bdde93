//! Ties the seams together: one engine owns the collaborators, builds the
//! context exactly once, and renders the published artifacts from it.

use crate::boundary::ArtifactStore;
use crate::compose;
use crate::error::Result;
use crate::manifest;
use crate::overrides::OverrideTables;
use crate::registry::{ContextBuilder, DocContext, SharedContext};
use flowdoc_api::MethodDescriptor;
use flowdoc_plugin::{ComponentDiscovery, DocAnnotations, MethodRulesSource, TypeIntrospection};
use once_cell::sync::OnceCell;
use std::sync::Arc;

pub struct DocEngine {
    discovery: Arc<dyn ComponentDiscovery>,
    introspection: Arc<dyn TypeIntrospection>,
    docs: Arc<dyn DocAnnotations>,
    rules_source: Arc<dyn MethodRulesSource>,
    tables: OverrideTables,
    search_roots: Option<Vec<String>>,
    context: SharedContext,
    rules: OnceCell<Vec<MethodDescriptor>>,
}

impl DocEngine {
    pub fn new(
        discovery: Arc<dyn ComponentDiscovery>,
        introspection: Arc<dyn TypeIntrospection>,
        docs: Arc<dyn DocAnnotations>,
        rules_source: Arc<dyn MethodRulesSource>,
        tables: OverrideTables,
    ) -> Self {
        Self {
            discovery,
            introspection,
            docs,
            rules_source,
            tables,
            search_roots: None,
            context: SharedContext::new(),
            rules: OnceCell::new(),
        }
    }

    pub fn with_search_roots(mut self, roots: Vec<String>) -> Self {
        self.search_roots = Some(roots);
        self
    }

    /// The memoized context; the first caller builds it.
    pub fn context(&self) -> Result<&DocContext> {
        self.context.get_or_build(|| {
            let mut builder =
                ContextBuilder::new(&*self.discovery, &*self.introspection, &self.tables);
            if let Some(roots) = &self.search_roots {
                builder = builder.with_search_roots(roots.clone());
            }
            builder.build()
        })
    }

    /// Method descriptors, parsed once; a parse failure is fatal.
    pub fn rules(&self) -> Result<&[MethodDescriptor]> {
        let rules = self
            .rules
            .get_or_try_init(|| self.rules_source.load().map_err(crate::FlowdocError::from))?;
        Ok(rules)
    }

    pub fn schema(&self) -> Result<String> {
        let context = self.context()?;
        let rules = self.rules()?;
        Ok(compose::compose(context, rules, &self.tables, &*self.docs))
    }

    pub fn lookup(&self) -> Result<String> {
        Ok(manifest::export_xml(self.context()?))
    }

    /// Assemble the boundary store; the JSON documentation manifest comes
    /// from the sibling extractor.
    pub fn artifacts(&self, doc_json: String) -> Result<ArtifactStore> {
        Ok(ArtifactStore::new(self.schema()?, self.lookup()?, doc_json))
    }
}

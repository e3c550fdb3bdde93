//! Shared catalog fixtures for the integration tests.
#![allow(dead_code)]

use flowdoc_core::catalog::{CatalogFile, CatalogType, StaticCatalog};
use flowdoc_core::engine::DocEngine;
use flowdoc_core::overrides::OverrideTables;
use flowdoc_core::rules::JsonMethodRules;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const I_LISTENER: &str = "org.flow.core.IListener";
pub const I_SENDER: &str = "org.flow.core.ISender";
pub const I_PIPE: &str = "org.flow.core.IPipe";
pub const I_STORAGE: &str = "org.flow.core.ITransactionalStorage";

pub fn entry(fqn: &str, capabilities: &[&str]) -> CatalogType {
    CatalogType {
        fqn: fqn.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    }
}

pub fn with_scalars(mut entry: CatalogType, scalars: &[&str]) -> CatalogType {
    entry.scalar_methods = scalars.iter().map(|m| m.to_string()).collect();
    entry
}

pub fn with_config(mut entry: CatalogType, methods: &[&str]) -> CatalogType {
    entry.config_methods = methods.iter().map(|m| m.to_string()).collect();
    entry
}

/// A representative snapshot of the framework: discovered components plus
/// the hand-declared infrastructure types.
pub fn framework_catalog() -> CatalogFile {
    let named = &["setName", "getName"];
    let types = vec![
        // Listeners
        with_config(
            with_scalars(
                entry("org.flow.listeners.JavaListener", &[I_LISTENER]),
                &["setName", "getName", "setServiceName", "getServiceName"],
            ),
            &["setSender"],
        ),
        // Senders
        with_scalars(
            entry("org.flow.senders.FileSender", &[I_SENDER]),
            &[
                "setName",
                "getName",
                "setDirectory",
                "getDirectory",
                "setCreateDirectory",
                "isCreateDirectory",
            ],
        ),
        with_scalars(entry("org.flow.jms.JmsSender", &[I_SENDER]), named),
        // Pipes
        with_scalars(entry("org.flow.pipes.EchoPipe", &[I_PIPE]), named),
        with_scalars(
            entry("org.flow.pipes.XmlValidatorPipe", &[I_PIPE]),
            &["setName", "getName", "setSchema", "getSchema"],
        ),
        with_scalars(entry("org.flow.pipes.SoapWrapperPipe", &[I_PIPE]), named),
        with_config(
            with_scalars(entry("org.flow.pipes.GenericMessageSendingPipe", &[I_PIPE]), named),
            &["setSender"],
        ),
        with_scalars(entry("org.flow.pipes.FilePipe", &[I_PIPE]), named),
        // Transactional storage
        with_scalars(
            entry("org.flow.jdbc.JdbcTransactionalStorage", &[I_STORAGE]),
            &["setName", "getName", "setSlotId", "getSlotId"],
        ),
        // Infrastructure (bypasses discovery, resolved by fqn)
        with_config(
            with_scalars(entry("org.flow.configuration.Configuration", &[]), named),
            &["registerAdapter", "registerScheduledJob"],
        ),
        with_config(
            with_scalars(
                entry("org.flow.core.Adapter", &[]),
                &["setName", "getName", "setDescription", "getDescription"],
            ),
            &["registerReceiver", "registerPipeLine"],
        ),
        with_config(
            with_scalars(entry("org.flow.receivers.GenericReceiver", &[]), named),
            &["setListener", "setErrorSender", "setErrorStorage", "setSender"],
        ),
        with_config(
            with_scalars(entry("org.flow.core.PipeLine", &[]), &[]),
            &[
                "setLocker",
                "addPipe",
                "registerCache",
                "setInputValidator",
                "registerPipeLineExit",
            ],
        ),
        with_scalars(
            entry("org.flow.core.PipeForward", &[]),
            &["setName", "getName", "setPath", "getPath"],
        ),
        with_scalars(
            entry("org.flow.core.PipeLineExit", &[]),
            &["setPath", "getPath", "setState", "getState"],
        ),
        with_scalars(
            entry("org.flow.parameters.Parameter", &[]),
            &["setName", "getName", "setValue", "getValue"],
        ),
        with_scalars(
            entry("org.flow.scheduler.JobDef", &[]),
            &["setName", "getName", "setCronExpression", "getCronExpression"],
        ),
        with_scalars(entry("org.flow.util.Locker", &[]), &["setObjectId", "getObjectId"]),
        with_scalars(entry("org.flow.cache.LruCache", &[]), &["setMaxSize", "getMaxSize"]),
        with_scalars(
            entry("org.flow.util.DirectoryCleaner", &[]),
            &["setDirectory", "getDirectory"],
        ),
    ];
    CatalogFile {
        types,
        scan_aborts: BTreeMap::new(),
    }
}

pub fn engine_for(file: CatalogFile, tables: OverrideTables) -> DocEngine {
    let catalog = Arc::new(StaticCatalog::new(file));
    DocEngine::new(
        catalog.clone(),
        catalog.clone(),
        catalog,
        Arc::new(JsonMethodRules::stock()),
        tables,
    )
}

pub fn framework_engine() -> DocEngine {
    engine_for(framework_catalog(), OverrideTables::default())
}

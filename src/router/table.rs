//! Build a [`Router`] from a route table configuration.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::{HookStage, RouteTableConfig};
use crate::router::{Context, Router, RouterError};
use crate::trie::PatternStore;

/// Key under which configured hooks record their labels.
pub const TRACE_KEY: &str = "trace";

/// Register every configured type, route and hook.
///
/// Placeholder types go into a store owned by the returned router, so the
/// process-wide default store is left untouched.
pub fn build_router(config: &RouteTableConfig) -> Result<Router, RouterError> {
    let mut store = PatternStore::with_builtins();
    for pattern in &config.patterns {
        store.register(pattern.name.as_str(), &pattern.regex)?;
    }

    let mut router = Router::with_store(Arc::new(store));
    router.set_delimiter(&config.delimiter)?;

    for route in &config.routes {
        let template: Arc<str> = Arc::from(route.body.as_str());
        for &method in &route.methods {
            let template = Arc::clone(&template);
            let status = route.status;
            router.on(method, &route.pattern, move |ctx| {
                ctx.set_status(status);
                let body = render(&template, &ctx.params);
                ctx.write_str(&body);
            })?;
        }
    }

    for hook in &config.hooks {
        let label = hook.label.clone();
        let record = move |ctx: &mut Context| record_trace(ctx, &label);
        match hook.stage {
            HookStage::Before => router.before(&hook.pattern, record)?,
            HookStage::After => router.after(&hook.pattern, record)?,
        }
    }

    tracing::info!(
        routes = router.trie().len(),
        hooks = config.hooks.len(),
        delimiter = %config.delimiter,
        "Router built"
    );
    Ok(router)
}

/// Replace each `{name}` in `template` with the matching parameter.
///
/// The template is scanned once, so parameter values are never themselves
/// expanded. Unknown names and unclosed braces are kept verbatim.
pub fn render(template: &str, params: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };
        let name = &tail[1..close];
        match params.get(name) {
            Some(value) if !name.contains('{') => out.push_str(value),
            _ => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

fn record_trace(ctx: &mut Context, label: &str) {
    let trace = ctx
        .data
        .entry(TRACE_KEY.to_string())
        .or_insert_with(|| json!([]));
    if let Value::Array(items) = trace {
        items.push(Value::from(label));
    }
}

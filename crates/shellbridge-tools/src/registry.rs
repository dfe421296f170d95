//! Tool registry for managing available tools

use std::collections::HashMap;
use std::sync::Arc;

use crate::base::Tool;
use crate::types::ToolSchema;

/// Registry for managing available tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All registered tool names, sorted for stable listings
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Schemas of all registered tools, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tool_names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.schema())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::ToolError;
    use crate::types::{ToolCall, ToolResult};
    use async_trait::async_trait;

    struct Named(&'static str);

    #[async_trait]
    impl Tool for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(self.name(), self.description(), vec![])
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::success(&call.id, self.name(), "ok"))
        }
    }

    #[test]
    fn registers_and_looks_up() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("beta")));
        registry.register(Arc::new(Named("alpha")));

        assert_eq!(registry.len(), 2);
        assert!(registry.has_tool("alpha"));
        assert!(registry.get("gamma").is_none());
        assert_eq!(registry.tool_names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Named("dup")));
        registry.register(Arc::new(Named("dup")));
        assert_eq!(registry.len(), 1);
    }
}

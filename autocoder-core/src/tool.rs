use crate::Result;
use crate::model::ToolDeclaration;
use async_trait::async_trait;
use serde_json::Value;

/// A capability an agent can invoke while working on a task.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, args: Value) -> Result<Value>;

    /// Function-calling declaration sent to the model.
    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration::function(self.name(), self.description(), self.parameters_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its arguments"
        }

        async fn execute(&self, args: Value) -> Result<Value> {
            Ok(args)
        }
    }

    #[test]
    fn test_default_declaration() {
        let decl = EchoTool.declaration();
        assert_eq!(decl.tool_type, "function");
        assert_eq!(decl.function.name, "echo");
        assert_eq!(decl.function.parameters["type"], "object");
    }

    #[tokio::test]
    async fn test_tool_execute() {
        let result = EchoTool.execute(serde_json::json!({"a": 1})).await.unwrap();
        assert_eq!(result["a"], 1);
    }
}

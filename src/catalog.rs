//! Catalog and content resolution
//!
//! The [`Catalog`] is the immutable context built once at startup from
//! the loaded [`Config`] and handed to the dispatcher. It owns the
//! manifest advertised on `initialize`/`tools/list` and resolves tool
//! and prompt content by name on demand.

use crate::config::{Config, PromptConfig, RuleEntry, ToolConfig, ToolContent};
use crate::mcp::protocol::{
    GetPromptResult, PromptArgument, PromptDescriptor, PromptMessage, ServerInfo, ToolCallResult,
    ToolDescriptor,
};
use crate::template::{self, Variables};

/// Startup-built summary of server identity and tool catalog.
#[derive(Debug, Clone)]
pub struct ServerManifest {
    pub name: String,
    pub version: String,
    pub tools: Vec<ToolDescriptor>,
}

impl ServerManifest {
    /// Identity block for the initialize handshake.
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

/// Read-only tool and prompt catalog, plus the derived manifest.
#[derive(Debug, Clone)]
pub struct Catalog {
    manifest: ServerManifest,
    tools: Vec<ToolConfig>,
    prompts: Vec<PromptConfig>,
}

impl Catalog {
    /// Build the catalog from loaded configuration. The manifest is
    /// projected here, once; nothing mutates it afterwards.
    pub fn new(config: Config) -> Self {
        let manifest = ServerManifest {
            name: config.server.name,
            version: config.server.version,
            tools: config.tools.iter().map(tool_descriptor).collect(),
        };
        Self {
            manifest,
            tools: config.tools,
            prompts: config.prompts,
        }
    }

    pub fn manifest(&self) -> &ServerManifest {
        &self.manifest
    }

    /// Prompt entries advertised in `prompts/list`, in catalog order.
    pub fn prompt_descriptors(&self) -> Vec<PromptDescriptor> {
        self.prompts.iter().map(prompt_descriptor).collect()
    }

    /// Resolve a tool's content by name. `None` when no tool matches;
    /// the caller decides how to report that.
    pub fn resolve_tool(&self, name: &str) -> Option<ToolCallResult> {
        let tool = self.tools.iter().find(|t| t.name == name)?;
        let text = match &tool.content {
            ToolContent::Markdown { markdown } => markdown.clone(),
            ToolContent::Structured {
                title,
                intro,
                rules,
                footer,
            } => synthesize_markdown(
                title.as_deref(),
                intro.as_deref(),
                rules,
                footer.as_deref(),
            ),
        };
        Some(ToolCallResult::text(text))
    }

    /// Resolve a prompt into a rendered user message. Defaults are
    /// filled for declared arguments before rendering; `None` when no
    /// prompt matches.
    pub fn resolve_prompt(&self, name: &str, arguments: &Variables) -> Option<GetPromptResult> {
        let prompt = self.prompts.iter().find(|p| p.name == name)?;
        let variables = template::fill_defaults(arguments, &prompt.arguments);
        let text = template::render(&prompt.template, &variables);
        let description = (!prompt.description.is_empty()).then(|| prompt.description.clone());
        Some(GetPromptResult {
            description,
            messages: vec![PromptMessage::user(text)],
        })
    }
}

fn tool_descriptor(tool: &ToolConfig) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.clone(),
        description: tool.description.clone(),
        input_schema: tool.input_schema.clone(),
    }
}

fn prompt_descriptor(prompt: &PromptConfig) -> PromptDescriptor {
    PromptDescriptor {
        name: prompt.name.clone(),
        description: prompt.description.clone(),
        arguments: prompt
            .arguments
            .iter()
            .map(|a| PromptArgument {
                name: a.name.clone(),
                description: a.description.clone(),
                required: a.required,
            })
            .collect(),
    }
}

/// Deterministic markdown for a structured tool document.
///
/// Layout: `### title` and intro each followed by a blank line, rules as
/// a 1-based numbered list, then a `---` rule and the footer in emphasis.
/// Absent fields contribute nothing, not even their blank line.
fn synthesize_markdown(
    title: Option<&str>,
    intro: Option<&str>,
    rules: &[RuleEntry],
    footer: Option<&str>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = title {
        lines.push(format!("### {}", title));
        lines.push(String::new());
    }
    if let Some(intro) = intro {
        lines.push(intro.to_string());
        lines.push(String::new());
    }
    for (index, rule) in rules.iter().enumerate() {
        lines.push(format!("{}.  **{}:** {}", index + 1, rule.name, rule.description));
    }
    if let Some(footer) = footer {
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(format!("*{}*", footer));
    }

    lines.join("\n")
}

//! Prompt templates for the agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a company research agent. Your job is to gather factual, current information about a company and report it in a structured form.

## Your Capabilities

You have access to the following tools:
{tool_descriptions}

## Rules and Guidelines

1. **Search before answering** - Don't answer from memory alone. Use web search to find the company's official site and current details.

2. **Prefer primary sources** - Contact pages, official sites, and filings beat aggregator sites.

3. **Report only what you found** - If a piece of information cannot be found, leave it out rather than guessing.

4. **Stay focused** - Only research the company you were asked about.

## Response Format

Report each piece of information on its own line as a key-value pair in the form `Field - value`.

If you need to use a tool, respond with a tool call. The system will execute it and return the result."#,
        tool_descriptions = tool_descriptions
    )
}

/// Fill the fixed research prompt for one company.
pub fn company_info_prompt(company_name: &str) -> String {
    format!(
        r#"Retrieve the following information for the company {company_name}:
- Contact details and address
  - Email
  - Phone number
  - Website
  - Postal code
  - Address
  - City
- Products
- Services
- Revenue
- Competitors
- Branches
- Careers
Please ensure the information is accurate and up-to-date. The details must be formatted as key-value pairs, one per line, in the form `Field - value`."#,
        company_name = company_name
    )
}

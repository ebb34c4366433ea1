// Shared prompt fragments.
// Each stage that calls the completion endpoint defines its own prompts.rs alongside it.

/// Appended to system prompts whose output is parsed as a JSON object.
pub const JSON_OBJECT_ONLY: &str = "Provide only the JSON object, no additional text. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to user prompts whose output is parsed as a JSON array.
pub const JSON_ARRAY_ONLY: &str = "Respond with the JSON array only. \
    Do NOT include any text before or after the array.";

/// Fills `{key}` placeholders in one left-to-right pass. Inserted values are
/// never rescanned, so braces in user text stay literal. Unknown `{...}` spans
/// (such as JSON examples in a template) are copied through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

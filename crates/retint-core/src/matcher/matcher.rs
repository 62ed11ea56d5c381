//! Applies a rule set to file content and produces findings.

use std::ops::Range;

use super::dynamic::is_dynamic;
use super::types::{Finding, FindingStatus};
use crate::rules::{MappingTarget, RewriteStrategy, Rule, RuleSet, UsageKind, TOKEN_GROUP};

/// Widest context line kept on a finding.
const MAX_CONTEXT: usize = 160;

/// Runs every rule of a [`RuleSet`] over a file, in declaration order.
///
/// Overlapping matches from different rules are all reported; resolving
/// them into edits is the rewriter's job.
pub struct Matcher<'a> {
    rules: &'a RuleSet,
}

impl<'a> Matcher<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Findings for `content`, sorted by (span start, rule order).
    pub fn find(&self, file: &str, content: &str) -> Vec<Finding> {
        let lines = LineIndex::new(content);
        let mut findings = Vec::new();

        for (order, rule) in self.rules.rules().iter().enumerate() {
            for scope in scopes(rule, content) {
                let haystack = &content[scope.clone()];
                for caps in rule.pattern().captures_iter(haystack) {
                    let (Some(whole), Some(token)) = (caps.get(0), caps.name(TOKEN_GROUP)) else {
                        continue;
                    };
                    let span = scope.start + whole.start()..scope.start + whole.end();
                    let token_span = scope.start + token.start()..scope.start + token.end();

                    if rule.is_standalone() && !is_standalone(content, &token_span) {
                        continue;
                    }

                    let container = rule.scope().map(|_| scope.clone());
                    let finding = self.build(
                        file,
                        content,
                        &lines,
                        rule,
                        order,
                        token.as_str(),
                        span,
                        token_span,
                        container,
                        rule.usage_for(&caps),
                    );
                    findings.push(finding);
                }
            }
        }

        findings.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(a.rule_order.cmp(&b.rule_order))
        });
        findings
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        file: &str,
        content: &str,
        lines: &LineIndex,
        rule: &Rule,
        order: usize,
        token: &str,
        span: Range<usize>,
        token_span: Range<usize>,
        container: Option<Range<usize>>,
        usage: UsageKind,
    ) -> Finding {
        let (line, column) = lines.position(content, span.start);
        let target = self.rules.table().get(token);

        let status = if is_dynamic(content, span.start, token) {
            FindingStatus::Dynamic
        } else if target.is_some() {
            FindingStatus::Mapped
        } else {
            FindingStatus::Unmapped
        };

        let replacement = match (status, target) {
            (FindingStatus::Mapped, Some(target)) => {
                Some(suggest(rule.strategy(), content, &span, &token_span, target))
            }
            _ => None,
        };

        Finding {
            file: file.to_string(),
            line,
            column,
            rule_id: rule.id().to_string(),
            usage,
            matched_text: content[span.clone()].to_string(),
            token: token.to_string(),
            replacement,
            note: target.and_then(|t| t.note()).map(str::to_string),
            status,
            context: lines.context(content, line),
            span,
            token_span,
            container,
            rule_order: order,
        }
    }
}

/// Ranges a rule runs over: its scope matches, or the whole content.
fn scopes(rule: &Rule, content: &str) -> Vec<Range<usize>> {
    match rule.scope() {
        Some(scope) => scope.find_iter(content).map(|m| m.range()).collect(),
        None => vec![0..content.len()],
    }
}

fn suggest(
    strategy: RewriteStrategy,
    content: &str,
    span: &Range<usize>,
    token_span: &Range<usize>,
    target: &MappingTarget,
) -> String {
    match strategy {
        RewriteStrategy::ReplaceMatch | RewriteStrategy::StyleToClass => target.value().to_string(),
        RewriteStrategy::ReplaceToken => format!(
            "{}{}{}",
            &content[span.start..token_span.start],
            target.value(),
            &content[token_span.end..span.end]
        ),
    }
}

fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// The token is a whole class name, not part of a longer one.
fn is_standalone(content: &str, token_span: &Range<usize>) -> bool {
    let before = content[..token_span.start].chars().next_back();
    let after = content[token_span.end..].chars().next();
    !before.is_some_and(is_class_char) && !after.is_some_and(is_class_char)
}

/// Byte offset -> (line, column) lookup.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// 1-based line and character column of `offset`.
    pub fn position(&self, content: &str, offset: usize) -> (u32, u32) {
        let idx = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        let column = content[self.starts[idx]..offset].chars().count() + 1;
        ((idx + 1) as u32, column as u32)
    }

    /// Trimmed text of a 1-based line, shortened for reports.
    pub fn context(&self, content: &str, line: u32) -> String {
        let idx = (line as usize).saturating_sub(1);
        let start = self.starts.get(idx).copied().unwrap_or(0);
        let end = self
            .starts
            .get(idx + 1)
            .map_or(content.len(), |next| next - 1);
        let text = content[start..end].trim();
        if text.chars().count() > MAX_CONTEXT {
            let cut: String = text.chars().take(MAX_CONTEXT).collect();
            format!("{cut}...")
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Preset;

    fn find(preset: Preset, content: &str) -> Vec<Finding> {
        let rules = RuleSet::preset(preset).unwrap();
        Matcher::new(&rules).find("src/App.tsx", content)
    }

    #[test]
    fn test_utility_class_is_mapped() {
        let findings = find(Preset::Classes, r#"<div className="p-4 bg-[var(--bg-cream)]">"#);
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.token, "--bg-cream");
        assert_eq!(f.status, FindingStatus::Mapped);
        assert_eq!(f.replacement.as_deref(), Some("bg-theme-primary"));
        assert_eq!((f.line, f.column), (1, 21));
        assert_eq!(f.rule_id, "utility-var");
    }

    #[test]
    fn test_unknown_token_is_unmapped() {
        let findings = find(Preset::Classes, r#"<p className="text-[var(--brand-ink)]">"#);
        assert_eq!(findings[0].status, FindingStatus::Unmapped);
        assert!(findings[0].replacement.is_none());
    }

    #[test]
    fn test_template_token_is_dynamic() {
        let findings = find(Preset::Classes, "<p className={`text-[var(--${tone})]`}>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].status, FindingStatus::Dynamic);
        assert!(findings[0].replacement.is_none());
    }

    #[test]
    fn test_variable_reference_keeps_fallback() {
        let findings = find(Preset::Variables, "color: var(--text-navy, #1a2b3c);");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].replacement.as_deref(), Some("var(--theme-text-primary"));
    }

    #[test]
    fn test_direct_colors_require_standalone_class() {
        let findings = find(
            Preset::DirectColors,
            r#"<div className="text-white/80 bg-white-ish hover:bg-black">"#,
        );
        let tokens: Vec<_> = findings.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(tokens, vec!["text-white", "bg-black"]);
        assert_eq!(findings[0].replacement.as_deref(), Some("text-theme-on-primary"));
    }

    #[test]
    fn test_style_property_is_scoped() {
        let content = r#"<h1 style={{ color: 'var(--text-navy)', padding: 4 }}>"#;
        let findings = find(Preset::Classes, content);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "style-property");
        assert!(findings[0].container.is_some());
        assert_eq!(findings[0].usage, UsageKind::Text);

        // Outside a style object the property rule does not fire.
        let loose = find(Preset::Classes, "const theme = { color: 'var(--text-navy)' };");
        assert!(loose.is_empty());
    }

    #[test]
    fn test_positions_are_one_based_chars() {
        let content = "// ünïcode\n  bg-[var(--bg-cream)]";
        let findings = find(Preset::Classes, content);
        assert_eq!((findings[0].line, findings[0].column), (2, 3));
        assert_eq!(findings[0].context, "bg-[var(--bg-cream)]");
    }

    #[test]
    fn test_sorted_by_position() {
        let content = "text-[var(--text-navy)] bg-[--bg-cream]";
        let findings = find(Preset::Classes, content);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].span.start < findings[1].span.start);
        assert_eq!(findings[1].rule_id, "utility-shorthand");
    }
}

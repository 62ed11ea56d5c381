//! Turning findings into a non-overlapping set of text edits.
//!
//! Every mapped finding (or style group, or annotation) becomes a candidate
//! made of one or more pieces. Replacement candidates are accepted in rule
//! declaration order; one that touches an already accepted piece is rejected
//! as a whole and its findings are marked superseded. Annotations are placed
//! afterwards: a marker for text that an accepted piece carries over
//! unchanged is spliced into that piece. Accepted pieces are then applied in
//! a single ascending pass.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matcher::{Finding, FindingStatus};
use crate::rules::{RewriteStrategy, RuleSet};

/// A static `className="..."` or `className='...'` attribute.
static CLASS_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bclassName=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#).expect("valid regex")
});

static EMPTY_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^style=\{\{\s*\}\}$").expect("valid regex"));

/// What to do with findings that have no mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnmappedPolicy {
    /// Leave the text unchanged; the finding is only reported.
    #[default]
    Skip,
    /// Insert a review marker after the match. `{token}` in the marker is
    /// replaced by the token.
    Annotate { marker: String },
}

/// Outcome of planning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    /// Content after all accepted edits.
    pub content: String,
    pub changed: bool,
    /// Mapped findings whose edit was accepted.
    pub replacements: usize,
    /// Review markers inserted.
    pub annotations: usize,
}

#[derive(Debug)]
struct Piece {
    span: Range<usize>,
    text: String,
    /// Source ranges copied verbatim into `text`, with their offset in it.
    carried: Vec<(Range<usize>, usize)>,
}

impl Piece {
    fn new(span: Range<usize>, text: String) -> Self {
        Self {
            span,
            text,
            carried: Vec::new(),
        }
    }

    /// Whether `span` survives unchanged inside this piece's text.
    fn carries(&self, span: &Range<usize>) -> bool {
        self.carried
            .iter()
            .any(|(range, _)| range.start <= span.start && span.end <= range.end)
    }

    /// Offset in `text` of source position `at`, when `at` is carried over.
    fn carried_offset(&self, at: usize) -> Option<usize> {
        self.carried
            .iter()
            .find(|(range, _)| range.start <= at && at <= range.end)
            .map(|(range, offset)| offset + (at - range.start))
    }
}

#[derive(Debug)]
struct Candidate {
    order: usize,
    pieces: Vec<Piece>,
    findings: Vec<usize>,
    annotation: bool,
}

impl Candidate {
    fn start(&self) -> usize {
        self.pieces.iter().map(|p| p.span.start).min().unwrap_or(0)
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Plan the edits for `content`. Finding statuses are updated in place:
/// losers of an overlap become [`FindingStatus::Superseded`], and style
/// findings on elements with a non-literal `className` become
/// [`FindingStatus::Dynamic`].
pub fn plan_edits(
    content: &str,
    findings: &mut [Finding],
    rules: &RuleSet,
    policy: &UnmappedPolicy,
) -> EditPlan {
    let mut candidates = Vec::new();
    let mut style_groups: BTreeMap<(usize, usize, usize), Vec<usize>> = BTreeMap::new();

    for (idx, finding) in findings.iter().enumerate() {
        let strategy = rules
            .rules()
            .get(finding.rule_order)
            .map(|r| r.strategy())
            .unwrap_or(RewriteStrategy::ReplaceMatch);

        match finding.status {
            FindingStatus::Mapped => {
                let Some(target) = rules.table().get(&finding.token) else {
                    continue;
                };
                let span = match strategy {
                    RewriteStrategy::StyleToClass => {
                        if let Some(container) = &finding.container {
                            style_groups
                                .entry((finding.rule_order, container.start, container.end))
                                .or_default()
                                .push(idx);
                            continue;
                        }
                        finding.span.clone()
                    }
                    RewriteStrategy::ReplaceMatch => finding.span.clone(),
                    RewriteStrategy::ReplaceToken => finding.token_span.clone(),
                };
                candidates.push(Candidate {
                    order: finding.rule_order,
                    pieces: vec![Piece::new(span, target.value().to_string())],
                    findings: vec![idx],
                    annotation: false,
                });
            }
            FindingStatus::Unmapped => {
                if let UnmappedPolicy::Annotate { marker } = policy {
                    let text = marker.replace("{token}", &finding.token);
                    // Style matches swallow trailing whitespace; mark the value itself.
                    let end = finding.span.start + finding.matched_text.trim_end().len();
                    if content[end..].trim_start().starts_with(&text) {
                        continue;
                    }
                    candidates.push(Candidate {
                        order: finding.rule_order,
                        pieces: vec![Piece::new(end..end, format!(" {text}"))],
                        findings: vec![idx],
                        annotation: true,
                    });
                }
            }
            FindingStatus::Dynamic | FindingStatus::Superseded => {}
        }
    }

    for ((order, start, end), members) in style_groups {
        match style_candidate(content, start..end, &members, findings, rules) {
            Some(candidate) => candidates.push(Candidate { order, ..candidate }),
            None => {
                for &idx in &members {
                    findings[idx].status = FindingStatus::Dynamic;
                    tracing::debug!(
                        file = %findings[idx].file,
                        line = findings[idx].line,
                        "className is an expression; style property left in place"
                    );
                }
            }
        }
    }

    candidates.sort_by_key(|c| (c.order, c.start()));
    let (notes, edits): (Vec<Candidate>, Vec<Candidate>) =
        candidates.into_iter().partition(|c| c.annotation);

    let mut accepted: Vec<Candidate> = Vec::new();
    for candidate in edits {
        if clashes(&candidate, &accepted) {
            for &idx in &candidate.findings {
                findings[idx].status = FindingStatus::Superseded;
            }
        } else {
            accepted.push(candidate);
        }
    }

    // (candidate, piece, offset in piece text, marker)
    let mut spliced: Vec<(usize, usize, usize, String)> = Vec::new();
    let mut seen_annotations = HashSet::new();
    for candidate in notes {
        let at = candidate.start();
        if !seen_annotations.insert((at, candidate.pieces[0].text.clone())) {
            continue;
        }
        let host = accepted.iter().enumerate().find_map(|(c, edit)| {
            edit.pieces.iter().enumerate().find_map(|(p, piece)| {
                piece.carried_offset(at).map(|offset| (c, p, offset))
            })
        });
        if let Some((c, p, offset)) = host {
            spliced.push((c, p, offset, candidate.pieces[0].text.clone()));
        } else if clashes(&candidate, &accepted) {
            for &idx in &candidate.findings {
                findings[idx].status = FindingStatus::Superseded;
            }
        } else {
            accepted.push(candidate);
        }
    }
    let mut annotations = spliced.len();
    spliced.sort_by(|a, b| b.2.cmp(&a.2));
    for (c, p, offset, text) in spliced {
        accepted[c].pieces[p].text.insert_str(offset, &text);
    }

    // Findings that were never candidates but sit under an accepted edit.
    let claimed: HashSet<usize> = accepted.iter().flat_map(|c| c.findings.iter().copied()).collect();
    for (idx, finding) in findings.iter_mut().enumerate() {
        if claimed.contains(&idx)
            || !matches!(finding.status, FindingStatus::Mapped | FindingStatus::Unmapped)
        {
            continue;
        }
        let covered = accepted.iter().flat_map(|c| &c.pieces).any(|piece| {
            !piece.span.is_empty()
                && overlaps(&finding.span, &piece.span)
                && !(finding.status == FindingStatus::Unmapped && piece.carries(&finding.span))
        });
        if covered {
            finding.status = FindingStatus::Superseded;
        }
    }

    let mut replacements = 0;
    for candidate in &accepted {
        if candidate.annotation {
            annotations += 1;
            continue;
        }
        for &idx in &candidate.findings {
            let finding = &findings[idx];
            replacements += 1;
            tracing::debug!(
                file = %finding.file,
                line = finding.line,
                token = %finding.token,
                replacement = finding.replacement.as_deref().unwrap_or_default(),
                note = finding.note.as_deref().unwrap_or_default(),
                "replace"
            );
        }
    }

    let mut pieces: Vec<&Piece> = accepted.iter().flat_map(|c| &c.pieces).collect();
    pieces.sort_by_key(|p| (p.span.start, p.span.end));

    let mut output = String::with_capacity(content.len() + pieces.len() * 16);
    let mut cursor = 0;
    for piece in &pieces {
        output.push_str(&content[cursor..piece.span.start]);
        output.push_str(&piece.text);
        cursor = piece.span.end;
    }
    output.push_str(&content[cursor..]);

    let changed = output != content;
    EditPlan {
        content: output,
        changed,
        replacements,
        annotations,
    }
}

fn clashes(candidate: &Candidate, accepted: &[Candidate]) -> bool {
    candidate.pieces.iter().any(|piece| {
        accepted
            .iter()
            .flat_map(|c| &c.pieces)
            .any(|other| overlaps(&piece.span, &other.span))
    })
}

/// Byte offset just past the `>` that closes the opening tag continuing at
/// `from`. Braces and quotes are skipped so `onClick={() => x}` does not end it.
fn opening_tag_end(content: &str, from: usize) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in content[from..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return from + i + 1,
                _ => {}
            },
        }
    }
    content.len()
}

/// Lift the mapped properties of one inline style object into classes.
///
/// Returns `None` when the element's `className` is not a string literal,
/// since merging into an expression cannot be done textually.
fn style_candidate(
    content: &str,
    container: Range<usize>,
    members: &[usize],
    findings: &[Finding],
    rules: &RuleSet,
) -> Option<Candidate> {
    let mut classes: Vec<String> = Vec::new();
    for &idx in members {
        if let Some(target) = rules.table().get(&findings[idx].token) {
            if !classes.iter().any(|c| c == target.value()) {
                classes.push(target.value().to_string());
            }
        }
    }

    // The rest of the style object once the lifted properties are gone.
    let mut remaining = String::new();
    let mut carried = Vec::new();
    let mut cursor = container.start;
    let mut spans: Vec<&Range<usize>> = members.iter().map(|&i| &findings[i].span).collect();
    spans.sort_by_key(|s| s.start);
    for span in spans {
        if span.start < cursor {
            continue;
        }
        carried.push((cursor..span.start, remaining.len()));
        remaining.push_str(&content[cursor..span.start]);
        cursor = span.end;
    }
    carried.push((cursor..container.end, remaining.len()));
    remaining.push_str(&content[cursor..container.end]);
    let emptied = EMPTY_STYLE.is_match(&remaining);

    // The whole opening tag: className may come before or after the style.
    let tag_start = content[..container.start].rfind('<').unwrap_or(0);
    let tag_end = opening_tag_end(content, container.end);
    let around = [tag_start..container.start, container.end..tag_end];

    let literal = around.iter().find_map(|range| {
        CLASS_ATTR
            .captures_iter(&content[range.clone()])
            .last()
            .map(|caps| (range.start, caps))
    });

    let mut pieces = Vec::new();
    if let Some((base, caps)) = literal {
        let value = caps.name("dq").or_else(|| caps.name("sq"))?;
        let existing: Vec<&str> = value.as_str().split_whitespace().collect();
        let added: Vec<&str> = classes
            .iter()
            .map(String::as_str)
            .filter(|c| !existing.contains(c))
            .collect();
        if !added.is_empty() {
            let at = base + value.end();
            let sep = if value.as_str().trim().is_empty() { "" } else { " " };
            pieces.push(Piece::new(at..at, format!("{sep}{}", added.join(" "))));
        }
        if emptied {
            // Drop the style attribute together with the whitespace before it.
            let trimmed = content[..container.start].trim_end().len().max(tag_start);
            pieces.push(Piece::new(trimmed..container.end, String::new()));
        } else {
            pieces.push(Piece {
                span: container.clone(),
                text: remaining,
                carried,
            });
        }
    } else if around
        .iter()
        .any(|range| content[range.clone()].contains("className="))
    {
        return None;
    } else {
        let class_attr = format!("className=\"{}\"", classes.join(" "));
        let piece = if emptied {
            Piece::new(container, class_attr)
        } else {
            let shift = class_attr.len() + 1;
            Piece {
                span: container,
                text: format!("{class_attr} {remaining}"),
                carried: carried
                    .into_iter()
                    .map(|(range, offset)| (range, offset + shift))
                    .collect(),
            }
        };
        pieces.push(piece);
    }

    Some(Candidate {
        order: 0,
        pieces,
        findings: members.to_vec(),
        annotation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::rules::Preset;

    fn plan(preset: Preset, content: &str, policy: &UnmappedPolicy) -> (EditPlan, Vec<Finding>) {
        let rules = RuleSet::preset(preset).unwrap();
        let mut findings = Matcher::new(&rules).find("a.tsx", content);
        let plan = plan_edits(content, &mut findings, &rules, policy);
        (plan, findings)
    }

    #[test]
    fn test_replace_match() {
        let (plan, _) = plan(
            Preset::Classes,
            r#"<div className="p-4 bg-[var(--bg-cream)] text-[--text-navy]">"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            r#"<div className="p-4 bg-theme-primary text-theme-primary">"#
        );
        assert_eq!(plan.replacements, 2);
    }

    #[test]
    fn test_replace_token_keeps_fallback() {
        let (plan, _) = plan(
            Preset::Variables,
            "a { color: var(--text-navy, #123); background: var(--bg-cream); }",
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            "a { color: var(--theme-text-primary, #123); background: var(--theme-bg-primary); }"
        );
    }

    #[test]
    fn test_opacity_modifier_survives() {
        let (plan, _) = plan(
            Preset::DirectColors,
            r#"<p className="text-white/80 bg-black">"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            r#"<p className="text-theme-on-primary/80 bg-theme-bg-secondary">"#
        );
    }

    #[test]
    fn test_style_object_emptied() {
        let (plan, _) = plan(
            Preset::Classes,
            r#"<h1 style={{ color: 'var(--text-navy)' }}>Hi</h1>"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(plan.content, r#"<h1 className="text-theme-primary">Hi</h1>"#);
        assert_eq!(plan.replacements, 1);
    }

    #[test]
    fn test_style_object_keeps_other_properties() {
        let (plan, _) = plan(
            Preset::Classes,
            r#"<div style={{ backgroundColor: "var(--bg-cream)", padding: 8 }}>"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            r#"<div className="bg-theme-primary" style={{ padding: 8 }}>"#
        );
    }

    #[test]
    fn test_style_merges_into_existing_class_name() {
        let (plan, _) = plan(
            Preset::Classes,
            r#"<div className="card" style={{ color: 'var(--text-navy)', backgroundColor: 'var(--bg-cream)' }}>"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            r#"<div className="card text-theme-primary bg-theme-primary">"#
        );
        assert_eq!(plan.replacements, 2);
    }

    #[test]
    fn test_style_with_expression_class_name_is_dynamic() {
        let content = r#"<div className={cn("card")} style={{ color: 'var(--text-navy)' }}>"#;
        let (plan, findings) = plan(Preset::Classes, content, &UnmappedPolicy::Skip);
        assert!(!plan.changed);
        assert_eq!(findings[0].status, FindingStatus::Dynamic);
    }

    #[test]
    fn test_annotation_inserted_once() {
        let policy = UnmappedPolicy::Annotate {
            marker: "/* retint: review {token} */".to_string(),
        };
        let content = r#"<p className="text-[var(--brand-ink)]">"#;
        let (first, _) = plan(Preset::Classes, content, &policy);
        assert_eq!(first.annotations, 1);
        assert!(first
            .content
            .contains("text-[var(--brand-ink)] /* retint: review --brand-ink */"));

        let (second, findings) = plan(Preset::Classes, &first.content, &policy);
        assert!(!second.changed);
        assert_eq!(findings[0].status, FindingStatus::Unmapped);
    }

    #[test]
    fn test_overlap_goes_to_first_declared_rule() {
        use crate::rules::{Rule, UsageKind};
        let rules = RuleSet::builder()
            .rule(
                Rule::new(
                    "whole",
                    UsageKind::Background,
                    r"bg-\[var\((?P<token>--[\w-]+)\)\]",
                    RewriteStrategy::ReplaceMatch,
                )
                .unwrap(),
            )
            .rule(
                Rule::new(
                    "inner",
                    UsageKind::Variable,
                    r"var\((?P<token>--[\w-]+)",
                    RewriteStrategy::ReplaceToken,
                )
                .unwrap(),
            )
            .mapping("--bg-cream", "bg-theme-primary")
            .build()
            .unwrap();
        let content = "bg-[var(--bg-cream)]";
        let mut findings = Matcher::new(&rules).find("a.tsx", content);
        assert_eq!(findings.len(), 2);

        let plan = plan_edits(content, &mut findings, &rules, &UnmappedPolicy::Skip);
        assert_eq!(plan.content, "bg-theme-primary");
        assert_eq!(plan.replacements, 1);
        let superseded: Vec<_> = findings
            .iter()
            .filter(|f| f.status == FindingStatus::Superseded)
            .map(|f| f.rule_id.as_str())
            .collect();
        assert_eq!(superseded, vec!["inner"]);
    }

    #[test]
    fn test_unmapped_style_property_stays_reported() {
        let content =
            r#"<h1 style={{ color: 'var(--text-navy)', backgroundColor: 'var(--mystery)' }}>"#;
        let (plan, findings) = plan(Preset::Classes, content, &UnmappedPolicy::Skip);
        assert_eq!(
            plan.content,
            r#"<h1 className="text-theme-primary" style={{ backgroundColor: 'var(--mystery)' }}>"#
        );
        let mystery = findings.iter().find(|f| f.token == "--mystery").unwrap();
        assert_eq!(mystery.status, FindingStatus::Unmapped);
    }

    #[test]
    fn test_unmapped_style_property_annotated_inside_object() {
        let policy = UnmappedPolicy::Annotate {
            marker: "/* retint: review {token} */".to_string(),
        };
        let content =
            r#"<h1 style={{ color: 'var(--text-navy)', backgroundColor: 'var(--mystery)' }}>"#;
        let (first, findings) = plan(Preset::Classes, content, &policy);
        assert_eq!(
            first.content,
            r#"<h1 className="text-theme-primary" style={{ backgroundColor: 'var(--mystery)' /* retint: review --mystery */ }}>"#
        );
        assert_eq!(first.replacements, 1);
        assert_eq!(first.annotations, 1);
        let mystery = findings.iter().find(|f| f.token == "--mystery").unwrap();
        assert_eq!(mystery.status, FindingStatus::Unmapped);

        let (second, _) = plan(Preset::Classes, &first.content, &policy);
        assert!(!second.changed);
    }

    #[test]
    fn test_class_name_after_style_is_merged() {
        let (plan, _) = plan(
            Preset::Classes,
            r#"<div style={{ color: 'var(--text-navy)' }} className="card">"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(plan.content, r#"<div className="card text-theme-primary">"#);
        assert_eq!(plan.content.matches("className=").count(), 1);
    }

    #[test]
    fn test_expression_class_name_after_style_is_dynamic() {
        let content = r#"<div style={{ color: 'var(--text-navy)' }} onClick={() => go()} className={cn("card")}>"#;
        let (plan, findings) = plan(Preset::Classes, content, &UnmappedPolicy::Skip);
        assert!(!plan.changed);
        assert_eq!(findings[0].status, FindingStatus::Dynamic);
    }

    #[test]
    fn test_class_name_on_next_element_is_not_merged() {
        let (plan, _) = plan(
            Preset::Classes,
            r#"<h1 style={{ color: 'var(--text-navy)' }}>Hi</h1><p className="lead">"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            r#"<h1 className="text-theme-primary">Hi</h1><p className="lead">"#
        );
    }

    #[test]
    fn test_utility_with_var_fallback() {
        let (plan, findings) = plan(
            Preset::Classes,
            r#"<div className="bg-[var(--bg-cream,#fff)] border-[var(--mystery,#000)]">"#,
            &UnmappedPolicy::Skip,
        );
        assert_eq!(
            plan.content,
            r#"<div className="bg-theme-primary border-[var(--mystery,#000)]">"#
        );
        assert_eq!(plan.replacements, 1);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].status, FindingStatus::Unmapped);
    }

    #[test]
    fn test_no_findings_no_change() {
        let content = "export const x = 1;\n";
        let (plan, findings) = plan(Preset::Classes, content, &UnmappedPolicy::Skip);
        assert!(findings.is_empty());
        assert!(!plan.changed);
        assert_eq!(plan.content, content);
    }
}

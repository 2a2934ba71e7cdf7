use portmap_protocol::{SourceDeclaration, TargetDeclaration};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Named scoring rules, evaluated in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// Candidate package ends with `.<first group segment>`.
    GroupTail,
    /// `.<first group segment>.` appears inside the candidate package.
    /// Only considered when [`ScoreRule::GroupTail`] did not apply.
    GroupSegment,
    /// Root-package declaration matched to a utility namespace.
    RootUtility,
    /// `*Range` declaration matched to the range namespace.
    RangeNamespace,
}

impl ScoreRule {
    pub const ORDERED: [ScoreRule; 4] = [
        ScoreRule::GroupTail,
        ScoreRule::GroupSegment,
        ScoreRule::RootUtility,
        ScoreRule::RangeNamespace,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringRules {
    pub group_tail: i32,
    pub group_segment: i32,
    pub root_utility: i32,
    pub range_namespace: i32,
    pub utility_package_suffix: String,
    pub range_package_suffix: String,
    pub range_name_suffix: String,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            group_tail: 20,
            group_segment: 10,
            root_utility: 8,
            range_namespace: 8,
            utility_package_suffix: ".utils".to_string(),
            range_package_suffix: ".range".to_string(),
            range_name_suffix: "Range".to_string(),
        }
    }
}

/// Points earned by one candidate and the rules that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    pub points: i32,
    pub rules: Vec<ScoreRule>,
}

impl ScoringRules {
    pub fn weight(&self, rule: ScoreRule) -> i32 {
        match rule {
            ScoreRule::GroupTail => self.group_tail,
            ScoreRule::GroupSegment => self.group_segment,
            ScoreRule::RootUtility => self.root_utility,
            ScoreRule::RangeNamespace => self.range_namespace,
        }
    }

    fn applies(
        &self,
        rule: ScoreRule,
        source: &SourceDeclaration,
        candidate: &TargetDeclaration,
    ) -> bool {
        let head = source.group_head();
        match rule {
            ScoreRule::GroupTail => {
                !head.is_empty() && candidate.package.ends_with(&format!(".{head}"))
            }
            ScoreRule::GroupSegment => {
                !head.is_empty()
                    && format!("{}.", candidate.package).contains(&format!(".{head}."))
            }
            ScoreRule::RootUtility => {
                source.is_root_group()
                    && candidate.package.ends_with(&self.utility_package_suffix)
            }
            ScoreRule::RangeNamespace => {
                source.name.ends_with(&self.range_name_suffix)
                    && candidate.package.ends_with(&self.range_package_suffix)
            }
        }
    }

    pub fn score(&self, source: &SourceDeclaration, candidate: &TargetDeclaration) -> MatchScore {
        let mut score = MatchScore {
            points: 0,
            rules: Vec::new(),
        };
        for rule in ScoreRule::ORDERED {
            if rule == ScoreRule::GroupSegment && score.rules.contains(&ScoreRule::GroupTail) {
                continue;
            }
            if self.applies(rule, source, candidate) {
                score.points += self.weight(rule);
                score.rules.push(rule);
            }
        }
        score
    }

    /// Highest-scoring candidate. Ties go to the shorter package, then to the
    /// greater fully-qualified name, then to the greater origin path, so the
    /// result does not depend on candidate order.
    pub fn best_match<'a>(
        &self,
        source: &SourceDeclaration,
        candidates: &[&'a TargetDeclaration],
    ) -> Option<&'a TargetDeclaration> {
        let best = candidates
            .iter()
            .copied()
            .map(|candidate| (self.score(source, candidate), candidate))
            .max_by_key(|(score, candidate)| {
                (
                    score.points,
                    Reverse(candidate.package.len()),
                    candidate.fqcn(),
                    candidate.origin.clone(),
                )
            });

        if let Some((score, candidate)) = &best {
            log::debug!(
                "{} -> {} ({} points via {:?}, {} candidates)",
                source.fqcn(),
                candidate.fqcn(),
                score.points,
                score.rules,
                candidates.len()
            );
        }
        best.map(|(_, candidate)| candidate)
    }
}

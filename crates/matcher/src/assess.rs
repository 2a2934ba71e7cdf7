use crate::classify::{Classifier, ClassifierRules};
use crate::scoring::ScoringRules;
use portmap_protocol::{Assessment, SourceDeclaration, StatusCounts};
use portmap_scanner::TargetInventory;

/// Scores candidates and classifies every source declaration.
pub struct Matcher {
    scoring: ScoringRules,
    classifier: Classifier,
}

impl Matcher {
    pub fn new(scoring: ScoringRules, rules: ClassifierRules) -> Self {
        Self {
            scoring,
            classifier: Classifier::new(rules),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn assess_one(&self, source: &SourceDeclaration, inventory: &TargetInventory) -> Assessment {
        let candidates = inventory.candidates(&source.name);
        let best = self.scoring.best_match(source, &candidates);
        let status = self.classifier.classify(source, best);
        let status = self.classifier.apply_override(source, status);
        Assessment {
            source: source.clone(),
            best: best.cloned(),
            status,
        }
    }

    /// One assessment per source declaration, in input order.
    pub fn assess(
        &self,
        sources: &[SourceDeclaration],
        inventory: &TargetInventory,
    ) -> Vec<Assessment> {
        let assessments: Vec<Assessment> = sources
            .iter()
            .map(|source| self.assess_one(source, inventory))
            .collect();

        let counts = StatusCounts::tally(assessments.iter().map(|a| &a.status));
        log::info!(
            "Assessed {} declarations: {} implemented, {} planned, {} subset, {} unsupported",
            counts.total(),
            counts.implemented,
            counts.planned,
            counts.subset,
            counts.unsupported
        );
        assessments
    }
}

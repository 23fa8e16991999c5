//! Pure set algebra between resume and JD skills.

use serde::{Deserialize, Serialize};

use crate::skills::SkillSet;

/// Outcome of comparing a resume's skills against a job description's.
///
/// Invariants (held by `compare_skill_sets`):
/// - the three sets are pairwise disjoint
/// - `common ∪ missing_from_resume == jd_skills`
/// - `common ∪ extra_in_resume == resume_skills`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub common: SkillSet,
    pub missing_from_resume: SkillSet,
    pub extra_in_resume: SkillSet,
}

impl ComparisonResult {
    /// True when the resume already covers every JD skill.
    pub fn is_full_coverage(&self) -> bool {
        self.missing_from_resume.is_empty()
    }
}

pub fn compare_skill_sets(resume_skills: &SkillSet, jd_skills: &SkillSet) -> ComparisonResult {
    let result = ComparisonResult {
        common: resume_skills.intersection(jd_skills),
        missing_from_resume: jd_skills.difference(resume_skills),
        extra_in_resume: resume_skills.difference(jd_skills),
    };
    debug_assert!(result.common.is_disjoint(&result.missing_from_resume));
    debug_assert!(result.common.is_disjoint(&result.extra_in_resume));
    debug_assert!(result.missing_from_resume.is_disjoint(&result.extra_in_resume));
    debug_assert_eq!(&result.common.union(&result.missing_from_resume), jd_skills);
    debug_assert_eq!(&result.common.union(&result.extra_in_resume), resume_skills);
    result
}

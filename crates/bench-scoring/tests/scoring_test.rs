use bench_core::{
    ConsultantProfile, JobRequirement, RateRange, RecordId, SubmissionOutcome, VendorRecord,
    VisaStatus,
};
use bench_scoring::{MatchScorer, ScoringError, VendorReliabilityScorer, VendorTier};

fn id(s: &str) -> RecordId {
    RecordId::new(s).expect("valid record id")
}

#[test]
fn test_partial_skill_match_scenario() {
    let job = JobRequirement::new(id("job-py"), "Python Developer").with_skills(["python", "sql", "aws"]);
    let profile = ConsultantProfile::new(id("c-py")).with_skills(["python", "aws"]);

    let result = MatchScorer::new().score(&job, &profile);
    assert_eq!(result.score, 67);
    assert_eq!(result.matched_skills, vec!["python", "aws"]);
    assert_eq!(result.missing_skills, vec!["sql"]);
    assert_eq!(result.job_id, job.id);
    assert_eq!(result.consultant_id, profile.id);
}

#[test]
fn test_identical_skills_no_conflicts_scores_full() {
    let job = JobRequirement::new(id("job-java"), "Java Developer")
        .with_skills(["java", "spring", "aws"])
        .with_rate(RateRange::new(60.0, 75.0))
        .with_location("Dallas, TX", true)
        .with_accepted_visas(vec![VisaStatus::H1b, VisaStatus::GreenCard]);
    let profile = ConsultantProfile::new(id("c-java"))
        .with_skills(["AWS", "Java", "Spring"])
        .with_rate(RateRange::new(70.0, 80.0))
        .with_location("Dallas, TX")
        .with_visa(VisaStatus::H1bTransfer);

    let result = MatchScorer::new().score(&job, &profile);
    assert_eq!(result.score, 100);
    assert!(result.rate_overlap);
    assert!(!result.visa_conflict);
    assert!(result.missing_skills.is_empty());
}

#[test]
fn test_score_always_in_range() {
    let skill_sets: [&[&str]; 4] = [&[], &["a"], &["a", "b", "c"], &["x", "y"]];
    let scorer = MatchScorer::new();

    for job_skills in skill_sets {
        for profile_skills in skill_sets {
            let job = JobRequirement::new(id("job-r"), "Role")
                .with_skills(job_skills.iter().copied())
                .with_rate(RateRange::new(50.0, 60.0))
                .with_accepted_visas(vec![VisaStatus::UsCitizen])
                .with_location("Remote", true);
            let profile = ConsultantProfile::new(id("c-r"))
                .with_skills(profile_skills.iter().copied())
                .with_rate(RateRange::new(55.0, 58.0))
                .with_visa(VisaStatus::Cpt);
            let score = scorer.score(&job, &profile).score;
            assert!(score <= 50, "capped score {score} above 50");
        }
    }
}

#[test]
fn test_vendor_reliability_scenarios() {
    let scorer = VendorReliabilityScorer::new();

    let vendor = VendorRecord::new(id("v-1"), "Acme Staffing", "Prime Vendor").with_history(9, 0, 1);
    let score = scorer.score(&vendor).expect("score vendor");
    assert_eq!(score.tier, VendorTier::Prime);
    assert_eq!(score.reliability, 90);

    let fresh = VendorRecord::new(id("v-2"), "New Co", "unknown");
    assert_eq!(scorer.score(&fresh).expect("score vendor").reliability, 50);
}

#[test]
fn test_reliability_follows_recorded_outcomes() {
    let scorer = VendorReliabilityScorer::new();
    let mut vendor = VendorRecord::new(id("v-3"), "Beta IT", "implementation partner");

    vendor.record(SubmissionOutcome::Placement);
    vendor.record(SubmissionOutcome::NoResponse);
    vendor.record(SubmissionOutcome::Rejection);
    vendor.record(SubmissionOutcome::Placement);

    let score = scorer.score(&vendor).expect("score vendor");
    assert_eq!(score.total_outcomes, 4);
    assert_eq!(score.reliability, 50);
}

#[test]
fn test_invalid_tier_propagates() {
    let vendor = VendorRecord::new(id("v-4"), "Odd LLC", "super vendor");
    assert_eq!(
        VendorReliabilityScorer::new().score(&vendor),
        Err(ScoringError::InvalidTier {
            tier: "super vendor".to_string()
        })
    );
}

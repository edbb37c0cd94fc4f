use cdinfo_lib::cddb::{FetchOutcome, MatchCandidate, MetadataRecord};
use cdinfo_lib::fingerprint::DiscFingerprint;
use cdinfo_lib::toc::models::DiscToc;

pub fn toc_report(toc: &DiscToc, fingerprint: &DiscFingerprint) -> Vec<String> {
    let mut lines = vec![format!(
        "Disc id {fingerprint}, tracks {}-{}, {} seconds",
        toc.first(),
        toc.last(),
        fingerprint.total_seconds
    )];

    lines.extend(toc.tracks().iter().map(|track| format!("  {track}")));
    lines.push(format!("  Leadout {}", toc.leadout()));

    lines
}

/// Matches are numbered from 0.
pub fn format_match(index: usize, candidate: &MatchCandidate) -> String {
    format!(
        "{:2}: {:>8} {:>8} {}",
        index,
        candidate.category,
        candidate.disc_key,
        candidate.title
    )
}

pub fn format_record(record: &MetadataRecord) -> Vec<String> {
    record
        .fields()
        .iter()
        .map(|(name, value)| format!("{name:>8} = {value}"))
        .collect()
}

pub fn print_toc(toc: &DiscToc, fingerprint: &DiscFingerprint) {
    for line in toc_report(toc, fingerprint) {
        println!("{line}");
    }
}

pub fn print_matches(candidates: &[MatchCandidate]) {
    if candidates.is_empty() {
        println!("No matches");
        return;
    }

    for (index, candidate) in candidates.iter().enumerate() {
        println!("{}", format_match(index, candidate));
    }
}

/// Empty entries count as failed reads.
pub fn print_outcomes(outcomes: &[FetchOutcome]) {
    for outcome in outcomes {
        println!();

        match &outcome.result {
            Ok(record) if !record.is_empty() => {
                for line in format_record(record) {
                    println!("{line}");
                }
            }
            _ => eprintln!(
                "Failed to read {}/{}",
                outcome.candidate.category, outcome.candidate.disc_key
            ),
        }
    }
}

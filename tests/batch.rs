mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{
    FakeSite, Reply, mirror_url, page, profile_page, profile_url, runner, runner_with_pause, site,
    with_profile,
};
use onefc::athlete::AthleteRecord;

fn rodtang_site() -> FakeSite {
    with_profile(
        FakeSite::new().probe(&profile_url("rodtang-jitmuangnon"), vec![page("Rodtang")]),
        "rodtang-jitmuangnon",
        r#"Rodtang "The Iron Man" Jitmuangnon"#,
        "Thailand",
    )
}

#[tokio::test]
async fn resolves_fetches_and_parses_one_athlete() {
    let fake = Arc::new(rodtang_site());

    let result = runner(&fake).run("Rodtang Jitmuangnon").await;
    assert_eq!(result.records.len(), 1);
    assert!(result.failed.is_empty());

    let record = &result.records[0];
    assert_eq!(record.name, "Rodtang Jitmuangnon");
    assert_eq!(record.nickname, "The Iron Man");
    assert_eq!(record.country, "Thailand");
    assert_eq!(record.url, profile_url("rodtang-jitmuangnon"));
    assert_eq!(record.names["English"], "Rodtang Jitmuangnon");
    assert_eq!(record.names["Thai"], "Rodtang Jitmuangnon (th)");
}

#[tokio::test]
async fn timed_out_locale_leaves_only_that_name_empty() {
    let fake = Arc::new(
        rodtang_site().page(&mirror_url("jp", "rodtang-jitmuangnon"), vec![Reply::Hang]),
    );

    let result = runner(&fake).run("Rodtang Jitmuangnon").await;
    let record = &result.records[0];
    assert_eq!(record.names.len(), 4);
    assert_eq!(record.names["Japanese"], "");
    assert_eq!(record.names["Thai"], "Rodtang Jitmuangnon (th)");
    assert_eq!(record.names["Chinese"], "Rodtang Jitmuangnon (cn)");
    assert_eq!(record.name, "Rodtang Jitmuangnon");
    assert_eq!(record.nickname, "The Iron Man");
    assert_eq!(record.country, "Thailand");
}

#[tokio::test]
async fn entry_failing_scan_succeeds_on_retry() {
    let fake = Arc::new(with_profile(
        FakeSite::new().probe(
            &profile_url("rodtang-jitmuangnon"),
            vec![Reply::NetworkError, page("Rodtang")],
        ),
        "rodtang-jitmuangnon",
        "Rodtang Jitmuangnon",
        "Thailand",
    ));

    let result = runner(&fake).run("Rodtang Jitmuangnon").await;
    assert_eq!(result.records.len(), 1);
    assert!(result.failed.is_empty());
    assert_eq!(fake.probe_calls(&profile_url("rodtang-jitmuangnon")), 2);
}

#[tokio::test]
async fn resolved_profile_without_name_is_retried() {
    let fake = Arc::new(
        rodtang_site().page(
            &profile_url("rodtang-jitmuangnon"),
            vec![
                Reply::Page("<html><body></body></html>".to_string()),
                Reply::Page(profile_page("Rodtang Jitmuangnon", Some("Thailand"))),
            ],
        ),
    );

    let result = runner(&fake).run("Rodtang Jitmuangnon").await;
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].country, "Thailand");
    assert_eq!(fake.page_calls(&profile_url("rodtang-jitmuangnon")), 2);
}

#[tokio::test]
async fn duplicate_entries_collapse_into_one() {
    let fake = Arc::new(rodtang_site());

    let result = runner(&fake)
        .run("Rodtang Jitmuangnon,   Rodtang Jitmuangnon  \nRodtang Jitmuangnon")
        .await;
    assert_eq!(result.records.len(), 1);
    assert_eq!(fake.probe_calls(&profile_url("rodtang-jitmuangnon")), 1);
}

#[tokio::test]
async fn entry_failing_both_phases_is_dropped() {
    let fake = Arc::new(FakeSite::new());

    let result = runner(&fake).run("Nobody Atall").await;
    assert!(result.is_empty());
    assert_eq!(result.failed, ["Nobody Atall"]);

    assert_eq!(fake.probe_calls(&profile_url("nobody-atall")), 2);
    assert_eq!(fake.probe_calls(&profile_url("nobody")), 2);
    assert_eq!(fake.page_calls(&site().search_url("Nobody Atall")), 2);
}

#[tokio::test]
async fn pauses_before_retrying_failed_entries() {
    let pause = Duration::from_millis(300);
    let fake = Arc::new(rodtang_site());

    let started = Instant::now();
    let result = runner_with_pause(&fake, pause)
        .run("Rodtang Jitmuangnon, Nobody Atall")
        .await;
    assert!(started.elapsed() >= pause);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.failed, ["Nobody Atall"]);
}

#[tokio::test]
async fn skips_pause_when_nothing_failed() {
    let pause = Duration::from_secs(2);
    let fake = Arc::new(rodtang_site());

    let started = Instant::now();
    let result = runner_with_pause(&fake, pause).run("Rodtang Jitmuangnon").await;
    assert!(started.elapsed() < pause);
    assert_eq!(result.records.len(), 1);
    assert!(result.failed.is_empty());
}

#[tokio::test]
async fn failures_do_not_block_other_entries() {
    let fake = Arc::new(with_profile(
        rodtang_site().probe(&profile_url("superlek"), vec![page("Superlek")]),
        "superlek",
        "Superlek Kiatmoo9",
        "Thailand",
    ));

    let result = runner(&fake)
        .run("Superlek\nNobody Atall, Rodtang Jitmuangnon")
        .await;
    let names = result
        .records
        .iter()
        .map(|record| record.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Superlek Kiatmoo9", "Rodtang Jitmuangnon"]);
    assert_eq!(result.failed, ["Nobody Atall"]);
}

#[tokio::test]
async fn replaying_a_batch_yields_the_same_records() {
    let fake = Arc::new(with_profile(
        rodtang_site().probe(&profile_url("superlek"), vec![page("Superlek")]),
        "superlek",
        "Superlek Kiatmoo9",
        "Thailand",
    ));
    let input = "Rodtang Jitmuangnon, Superlek, Nobody Atall";

    let first = runner(&fake).run(input).await;
    let second = runner(&fake).run(input).await;

    let first: HashSet<AthleteRecord> = first.records.into_iter().collect();
    let second: HashSet<AthleteRecord> = second.records.into_iter().collect();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn blank_input_yields_empty_result() {
    let fake = Arc::new(FakeSite::new());

    let result = runner(&fake).run(" ,\n ,").await;
    assert!(result.is_empty());
    assert!(result.failed.is_empty());
    assert_eq!(fake.total_calls(), 0);
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use linkrotator::generator::{
    Clock, LinkGenerator, RandomSource, SeededRandom, SystemClock, ThreadRandom,
};
use linkrotator::utils::encode_base36;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn default_generator() -> LinkGenerator {
    LinkGenerator::new(
        "http://localhost:3000".to_string(),
        Arc::new(SystemClock),
        Arc::new(ThreadRandom),
    )
}

fn query_pairs(url: &str) -> Vec<(String, String)> {
    let query = url.split('?').nth(1).expect("链接应包含查询串");
    query
        .split('&')
        .map(|kv| {
            let mut parts = kv.splitn(2, '=');
            (
                parts.next().unwrap_or_default().to_string(),
                parts.next().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_url_contains_view_fragment() {
    let url = default_generator().generate("proj-9", "link_0_1");
    assert!(url.starts_with("http://localhost:3000/#/view/proj-9?"));
}

#[test]
fn test_url_has_exactly_five_params_in_order() {
    let url = default_generator().generate("proj-9", "link_0_1");
    let keys: Vec<String> = query_pairs(&url).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["r", "ts", "h", "n", "s"]);
}

#[test]
fn test_n_param_is_bounded() {
    for _ in 0..50 {
        let url = default_generator().generate("proj-9", "link_0_1");
        let pairs = query_pairs(&url);
        let n: u64 = pairs
            .iter()
            .find(|(k, _)| k == "n")
            .map(|(_, v)| v.parse().expect("n 应为十进制整数"))
            .unwrap();
        assert!(n < 1_000_000);
    }
}

#[test]
fn test_s_param_is_ten_base36_chars() {
    let url = default_generator().generate("proj-9", "link_0_1");
    let pairs = query_pairs(&url);
    let s = &pairs.iter().find(|(k, _)| k == "s").unwrap().1;
    assert_eq!(s.len(), 10);
    assert!(
        s.chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
}

#[test]
fn test_r_param_shape() {
    let url = default_generator().generate("proj-9", "link_0_1");
    let pairs = query_pairs(&url);
    let r = &pairs.iter().find(|(k, _)| k == "r").unwrap().1;
    assert!(r.len() <= 13);
    assert!(
        r.chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
}

#[test]
fn test_ts_param_matches_injected_clock() {
    let fixed = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let generator = LinkGenerator::new(
        "http://localhost:3000".to_string(),
        Arc::new(FixedClock(fixed)),
        Arc::new(ThreadRandom),
    );

    let url = generator.generate("proj-9", "link_0_1");
    let pairs = query_pairs(&url);
    let ts = &pairs.iter().find(|(k, _)| k == "ts").unwrap().1;
    assert_eq!(ts, &encode_base36(1_704_067_200_000));
}

#[test]
fn test_seeded_generator_is_deterministic() {
    let fixed = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let make = || {
        LinkGenerator::new(
            "http://localhost:3000".to_string(),
            Arc::new(FixedClock(fixed)),
            Arc::new(SeededRandom::new(1234)),
        )
    };

    assert_eq!(
        make().generate("proj-9", "link_0_1"),
        make().generate("proj-9", "link_0_1")
    );
}

#[test]
fn test_seeded_random_range() {
    let random = SeededRandom::new(5);
    for _ in 0..100 {
        let f = random.next_fraction();
        assert!((0.0..1.0).contains(&f));
        assert!(random.next_below(10) < 10);
    }
}

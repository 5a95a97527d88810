//! 备用链接生成器
//!
//! 根据项目 ID 和链接 ID 拼出混淆后的长链接。时间与随机数都通过
//! trait 注入，测试时可以换成固定时钟和种子随机源。

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::utils::{base36_char, encode_base36, fraction_base36};

/// 墙上时钟抽象
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> u64 {
        self.now().timestamp_millis().max(0) as u64
    }
}

/// 系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 随机源抽象，非加密强度
pub trait RandomSource: Send + Sync {
    /// 返回 [0,1) 区间内的小数
    fn next_fraction(&self) -> f64;

    /// 返回 [0, bound) 区间内的整数
    fn next_below(&self, bound: u64) -> u64;
}

/// 基于线程本地 RNG 的默认随机源
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_fraction(&self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn next_below(&self, bound: u64) -> u64 {
        rand::rng().random_range(0..bound)
    }
}

/// 种子固定的随机源，用于可复现的生成结果
pub struct SeededRandom {
    inner: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_fraction(&self) -> f64 {
        self.inner.lock().random::<f64>()
    }

    fn next_below(&self, bound: u64) -> u64 {
        self.inner.lock().random_range(0..bound)
    }
}

/// 链接生成器
pub struct LinkGenerator {
    base_url: String,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl LinkGenerator {
    pub fn new(base_url: String, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            base_url,
            clock,
            random,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 生成一条混淆链接
    ///
    /// 形如 `<base>/#/view/<project>?r=..&ts=..&h=..&n=..&s=..`，
    /// 五个参数按 r, ts, h, n, s 的顺序写入查询串。
    pub fn generate(&self, project_id: &str, link_id: &str) -> String {
        let now_millis = self.clock.now_millis();

        // r: 随机小数的 base36 小数位，取第 2..15 位，长度可变
        let r = fraction_base36(self.random.next_fraction(), 13);

        // ts: 毫秒时间戳的 base36 表示
        let ts = encode_base36(now_millis);

        // h: base64("{project}_{link}_{millis}") 的前 20 个字符
        let h: String = STANDARD
            .encode(format!("{}_{}_{}", project_id, link_id, now_millis))
            .chars()
            .take(20)
            .collect();

        // n: [0, 1000000) 的十进制随机数
        let n = self.random.next_below(1_000_000).to_string();

        // s: 10 个独立采样的 base36 字符
        let s: String = (0..10)
            .map(|_| base36_char((self.random.next_fraction() * 36.0) as usize))
            .collect();

        let params = [("r", r), ("ts", ts), ("h", h), ("n", n), ("s", s)];
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/#/view/{}?{}", self.base_url, project_id, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn test_generator() -> LinkGenerator {
        let fixed = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        LinkGenerator::new(
            "http://localhost:3000".to_string(),
            Arc::new(FixedClock(fixed)),
            Arc::new(SeededRandom::new(42)),
        )
    }

    #[test]
    fn test_generate_contains_view_path() {
        let generator = test_generator();
        let url = generator.generate("proj-1", "link_0_0");
        assert!(url.contains("#/view/proj-1"));
    }

    #[test]
    fn test_generate_param_order() {
        let generator = test_generator();
        let url = generator.generate("proj-1", "link_0_0");
        let query = url.split('?').nth(1).unwrap();
        let keys: Vec<&str> = query
            .split('&')
            .map(|kv| kv.split('=').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["r", "ts", "h", "n", "s"]);
    }

    #[test]
    fn test_generate_ts_matches_clock() {
        let generator = test_generator();
        let url = generator.generate("proj-1", "link_0_0");
        // 2024-01-01T00:00:00Z == 1704067200000 毫秒
        let expected = encode_base36(1_704_067_200_000);
        assert!(url.contains(&format!("&ts={}&", expected)));
    }

    #[test]
    fn test_generate_h_is_base64_prefix() {
        let generator = test_generator();
        let url = generator.generate("proj-1", "link_0_0");
        let expected: String = STANDARD
            .encode("proj-1_link_0_0_1704067200000")
            .chars()
            .take(20)
            .collect();
        let encoded = urlencoding::encode(&expected).into_owned();
        assert!(url.contains(&format!("&h={}&", encoded)));
    }
}

//! 访客指纹计算。
//!
//! 对固定顺序的环境信号元组做SHA-256，取十六进制前32位。同样的
//! 信号必然得到同样的指纹；信号全缺时退化为随机加时间的种子，
//! 保证永远能产出一个可用的指纹。

use crate::models::actor::ClientSignals;
use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};

pub const FINGERPRINT_LEN: usize = 32;

pub fn from_signals(signals: &ClientSignals) -> String {
    if signals.is_empty() {
        return fallback_seed();
    }
    digest(&canonical(signals))
}

/// 信号的规范串：字段顺序固定，缺失字段留空位
fn canonical(signals: &ClientSignals) -> String {
    fn text(value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }
    fn num<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map(|v| v.to_string()).unwrap_or_default()
    }

    [
        text(&signals.user_agent),
        text(&signals.language),
        num(&signals.screen_width),
        num(&signals.screen_height),
        num(&signals.color_depth),
        num(&signals.timezone_offset),
        num(&signals.hardware_concurrency),
        num(&signals.device_memory),
        text(&signals.platform),
        num(&signals.pixel_ratio),
        num(&signals.max_touch_points),
        text(&signals.canvas_hash),
    ]
    .join("|")
}

/// 降级种子：时间戳加随机数，依旧走同一条哈希路径
fn fallback_seed() -> String {
    let salt: u64 = rand::thread_rng().gen();
    digest(&format!(
        "fallback|{}|{}",
        Utc::now().timestamp_millis(),
        salt
    ))
}

fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hex = hex::encode(hasher.finalize());
    hex[..FINGERPRINT_LEN].to_string()
}

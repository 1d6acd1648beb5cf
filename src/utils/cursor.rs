//! 不透明分页游标。
//!
//! 游标只是过滤后有序ID列表里的一个偏移量，经Base64包装后对调用方
//! 不透明。换了搜索词游标就失效，这是约定内的行为：解码失败一律
//! 回落到第一页，绝不报错。

use base64::{engine::general_purpose, Engine as _};

const PREFIX: &str = "offset:";

pub fn encode(offset: usize) -> String {
    general_purpose::STANDARD.encode(format!("{}{}", PREFIX, offset))
}

/// 解码游标；None、乱码、别的过滤条件下发出的游标都按偏移0处理
pub fn decode(cursor: Option<&str>) -> usize {
    let Some(cursor) = cursor else {
        return 0;
    };
    let Ok(raw) = general_purpose::STANDARD.decode(cursor) else {
        return 0;
    };
    let Ok(text) = String::from_utf8(raw) else {
        return 0;
    };
    text.strip_prefix(PREFIX)
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(0)
}

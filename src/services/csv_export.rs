//! CSV 导出 - 业务能力层
//!
//! 只负责把联系人格式化成 CSV 文本和生成导出文件名

use chrono::{Datelike, NaiveDateTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

use crate::models::ExtractedContact;

/// CSV 表头
pub const CSV_HEADER: &str = "Nome,Telefone,Origem";

/// 葡语（巴西）月份缩写，与浏览器 `pt-BR` 短月份格式一致
const PT_BR_MONTHS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

fn non_digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\D").expect("valid regex"))
}

/// 给没有区号的电话补上区号
///
/// 去掉非数字字符后：
/// - 10 位及以上：已带区号，原样返回
/// - 8 或 9 位：返回 `"(区号) 原始写法"`
/// - 其他（包括空字符串）：原样返回
pub fn format_phone(phone: &str, area_code: &str) -> String {
    let digits = non_digit_regex().replace_all(phone, "");

    match digits.len() {
        8 | 9 => format!("({}) {}", area_code, phone),
        _ => phone.to_string(),
    }
}

/// CSV 字段：总是加双引号，内部双引号转义为两个
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// 生成 CSV 文本（UTF-8，`\n` 换行，无结尾换行）
pub fn to_csv(contacts: &[ExtractedContact], area_code: &str) -> String {
    let mut lines = Vec::with_capacity(contacts.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for contact in contacts {
        lines.push(format!(
            "{},{},{}",
            quote(&contact.name),
            quote(&format_phone(&contact.phone, area_code)),
            quote(&contact.source)
        ));
    }

    lines.join("\n")
}

/// 导出文件名：`contatos_feira_{日}-{月}-{年}_{时}-{分}.csv`
pub fn export_file_name(now: &NaiveDateTime) -> String {
    format!(
        "contatos_feira_{}-{}-{}_{:02}-{:02}.csv",
        now.day(),
        PT_BR_MONTHS[now.month0() as usize],
        now.year(),
        now.hour(),
        now.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("99999999", "32"), "(32) 99999999");
        assert_eq!(format_phone("9 8888-7777", "32"), "(32) 9 8888-7777");
        assert_eq!(format_phone("3299998888", "32"), "3299998888");
        assert_eq!(format_phone("(32) 98888-7777", "32"), "(32) 98888-7777");
        assert_eq!(format_phone("", "32"), "");
        assert_eq!(format_phone("1234", "32"), "1234");
    }

    #[test]
    fn test_to_csv_rows() {
        let contacts = vec![
            ExtractedContact::new("Ana Silva", "99999999", "Facebook"),
            ExtractedContact::new("João Souza", "3299998888", ""),
        ];

        let csv = to_csv(&contacts, "32");

        assert_eq!(
            csv,
            "Nome,Telefone,Origem\n\
             \"Ana Silva\",\"(32) 99999999\",\"Facebook\"\n\
             \"João Souza\",\"3299998888\",\"\""
        );
    }

    #[test]
    fn test_to_csv_empty_is_header_only() {
        assert_eq!(to_csv(&[], "32"), CSV_HEADER);
    }

    #[test]
    fn test_to_csv_escapes_quotes() {
        let contacts = vec![ExtractedContact::new("Zé \"Grande\"", "", "TV")];
        assert_eq!(
            to_csv(&contacts, "32"),
            "Nome,Telefone,Origem\n\"Zé \"\"Grande\"\"\",\"\",\"TV\""
        );
    }

    #[test]
    fn test_export_file_name() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(export_file_name(&now), "contatos_feira_7-out.-2026_09-05.csv");

        let may = NaiveDate::from_ymd_opt(2025, 5, 23)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        assert_eq!(export_file_name(&may), "contatos_feira_23-mai.-2025_18-30.csv");
    }
}

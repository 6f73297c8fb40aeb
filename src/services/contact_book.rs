//! 联系人结果集 - 业务能力层
//!
//! 在整个会话中累积识别结果，负责展示和导出。
//! 编排层只通过回调追加，从不读取或清空。

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tracing::info;

use crate::models::ExtractedContact;
use crate::services::csv_export;

/// 按追加顺序保存的联系人列表
#[derive(Debug, Clone)]
pub struct ContactBook {
    contacts: Vec<ExtractedContact>,
    area_code: String,
}

impl ContactBook {
    pub fn new(area_code: impl Into<String>) -> Self {
        Self {
            contacts: Vec::new(),
            area_code: area_code.into(),
        }
    }

    /// 追加一组联系人，不去重
    pub fn append(&mut self, contacts: impl IntoIterator<Item = ExtractedContact>) {
        self.contacts.extend(contacts);
    }

    /// 清空（只由用户操作触发）
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn contacts(&self) -> &[ExtractedContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn to_csv(&self) -> String {
        csv_export::to_csv(&self.contacts, &self.area_code)
    }

    /// 渲染成终端表格，没有联系人时返回空字符串
    ///
    /// 列宽由 tabled 按显示宽度计算，空字段显示为 `-`
    pub fn render(&self) -> String {
        if self.contacts.is_empty() {
            return String::new();
        }

        let mut builder = Builder::default();
        builder.push_record(["Nome", "Tel", "Origem"]);

        for contact in &self.contacts {
            let phone = if contact.phone.is_empty() {
                String::new()
            } else {
                csv_export::format_phone(&contact.phone, &self.area_code)
            };
            builder.push_record([
                placeholder(&contact.name),
                placeholder(&phone),
                placeholder(&contact.source),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("Contatos ({})\n{}", self.contacts.len(), table)
    }

    /// 把 CSV 写入 `dir`，文件名带上当前时间
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn export(&self, dir: &Path, now: &NaiveDateTime) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("无法创建导出目录: {}", dir.display()))?;

        let path = dir.join(csv_export::export_file_name(now));
        tokio::fs::write(&path, self.to_csv())
            .await
            .with_context(|| format!("写入 CSV 失败: {}", path.display()))?;

        info!("💾 已导出 {} 个联系人: {}", self.contacts.len(), path.display());

        Ok(path)
    }
}

fn placeholder(cell: &str) -> &str {
    if cell.is_empty() {
        "-"
    } else {
        cell
    }
}

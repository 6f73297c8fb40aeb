//! 联系人数据模型

/// 从报名卡片中提取出的联系人
///
/// 三个字段都必定存在，无法识别时为空字符串。
/// 没有身份标识，允许重复。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContact {
    /// 姓名（名 + 最后一个姓）
    pub name: String,
    /// 电话号码（保持卡片上的原始写法）
    pub phone: String,
    /// 得知活动的渠道
    pub source: String,
}

impl ExtractedContact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            source: source.into(),
        }
    }

    /// 姓名或电话至少有一项非空才算可用
    ///
    /// 只有渠道的记录没有意义，会被丢弃
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty() || !self.phone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_requires_name_or_phone() {
        assert!(ExtractedContact::new("Ana Silva", "", "").is_usable());
        assert!(ExtractedContact::new("", "99999999", "").is_usable());
        assert!(!ExtractedContact::new("", "", "Facebook").is_usable());
        assert!(!ExtractedContact::default().is_usable());
    }
}

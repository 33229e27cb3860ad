// ==========================================
// 产线平衡优化引擎 - 工序分类器
// ==========================================
// 职责: 为关键度加权/成本方案提供工序分类
// 说明:
// - 默认实现按工序名称关键字匹配（calidad/quality, ensamblaje/assembly）
// - 名称匹配较脆弱，可替换为按工序ID打标签的 TaggedClassifier
// ==========================================

use crate::domain::process::Process;
use crate::domain::types::ProcessCategory;
use std::collections::HashMap;

/// 工序分类接口
pub trait ProcessClassifier: Send + Sync {
    fn classify(&self, process: &Process) -> ProcessCategory;
}

// ==========================================
// KeywordClassifier - 名称关键字分类
// ==========================================
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    quality_keywords: Vec<String>,
    assembly_keywords: Vec<String>,
}

impl KeywordClassifier {
    pub fn new(quality_keywords: Vec<String>, assembly_keywords: Vec<String>) -> Self {
        Self {
            quality_keywords: quality_keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            assembly_keywords: assembly_keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(
            vec!["calidad".to_string(), "quality".to_string()],
            vec!["ensamblaje".to_string(), "assembly".to_string()],
        )
    }
}

impl ProcessClassifier for KeywordClassifier {
    /// 质量关键字优先于装配关键字
    fn classify(&self, process: &Process) -> ProcessCategory {
        let name = process.name.to_lowercase();
        if self.quality_keywords.iter().any(|k| name.contains(k.as_str())) {
            ProcessCategory::Quality
        } else if self.assembly_keywords.iter().any(|k| name.contains(k.as_str())) {
            ProcessCategory::Assembly
        } else {
            ProcessCategory::General
        }
    }
}

// ==========================================
// TaggedClassifier - 按工序ID显式打标签
// ==========================================
// 未打标签的工序回落到关键字分类
#[derive(Debug, Clone, Default)]
pub struct TaggedClassifier {
    tags: HashMap<String, ProcessCategory>,
    fallback: KeywordClassifier,
}

impl TaggedClassifier {
    pub fn new(tags: HashMap<String, ProcessCategory>) -> Self {
        Self {
            tags,
            fallback: KeywordClassifier::default(),
        }
    }

    pub fn tag(mut self, process_id: impl Into<String>, category: ProcessCategory) -> Self {
        self.tags.insert(process_id.into(), category);
        self
    }
}

impl ProcessClassifier for TaggedClassifier {
    fn classify(&self, process: &Process) -> ProcessCategory {
        self.tags
            .get(&process.id)
            .copied()
            .unwrap_or_else(|| self.fallback.classify(process))
    }
}

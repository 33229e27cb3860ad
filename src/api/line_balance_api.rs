// ==========================================
// 产线平衡优化引擎 - 产线平衡 API
// ==========================================
// 职责: 单个料号的平衡会话
// - 持有工序目录、当前分配、当前方案建议
// - 对接配置历史仓储
// 说明: 当前分配只通过显式替换改变；人工调整后方案建议立即失效
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfig;
use crate::domain::allocation::Allocation;
use crate::domain::configuration::Configuration;
use crate::domain::process::{PartNumber, Process};
use crate::domain::types::OptimizationType;
use crate::engine::classifier::ProcessClassifier;
use crate::engine::editor::AllocationEditor;
use crate::engine::generator::StrategyGenerator;
use crate::engine::strategy::{apply_model, OptimizationModel};
use crate::repository::configuration_repo::ConfigurationRepository;

// ==========================================
// DTO 定义
// ==========================================

/// 方案对比行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub model_type: OptimizationType,
    pub name: String,
    pub run_rate: f64,
    pub bottleneck_name: String,
    /// 相对当前分配的产出差值（无当前分配时为 None）
    pub delta_vs_active: Option<f64>,
    /// 相对料号基准产出的差值（基准未设置时为 None）
    pub delta_vs_baseline: Option<f64>,
}

// ==========================================
// LineBalanceApi
// ==========================================

pub struct LineBalanceApi {
    part_number: PartNumber,
    catalog: Vec<Process>,
    generator: StrategyGenerator,
    editor: AllocationEditor,
    configuration_repo: Arc<ConfigurationRepository>,
    active: Option<Allocation>,
    models: Vec<OptimizationModel>,
}

impl LineBalanceApi {
    pub fn new(
        part_number: PartNumber,
        catalog: Vec<Process>,
        config: EngineConfig,
        configuration_repo: Arc<ConfigurationRepository>,
    ) -> Self {
        let editor = AllocationEditor::new(config.tie_break);
        Self {
            part_number,
            catalog,
            generator: StrategyGenerator::new(config),
            editor,
            configuration_repo,
            active: None,
            models: Vec::new(),
        }
    }

    /// 替换工序分类器（默认按名称关键字分类）
    pub fn with_classifier(mut self, classifier: Box<dyn ProcessClassifier>) -> Self {
        let config = self.generator.config().clone();
        self.generator = StrategyGenerator::with_classifier(config, classifier);
        self
    }

    pub fn part_number(&self) -> &PartNumber {
        &self.part_number
    }

    pub fn catalog(&self) -> &[Process] {
        &self.catalog
    }

    pub fn active_allocation(&self) -> Option<&Allocation> {
        self.active.as_ref()
    }

    /// 当前有效的方案建议（人工调整后为空）
    pub fn models(&self) -> &[OptimizationModel] {
        &self.models
    }

    /// 替换工序目录；当前方案建议随之失效
    pub fn set_catalog(&mut self, catalog: Vec<Process>) {
        self.catalog = catalog;
        self.models.clear();
    }

    // ==========================================
    // 计算与方案
    // ==========================================

    /// 按比例均衡计算分配，并设为当前分配
    #[instrument(skip(self), fields(part_number_id = %self.part_number.id))]
    pub fn compute_allocation(&mut self, total_personnel: f64) -> ApiResult<Allocation> {
        let allocation = self.run_strategy(OptimizationType::Balanced, total_personnel)?;
        self.replace_active(allocation.clone());
        Ok(allocation)
    }

    /// 使用料号可用人数计算分配
    pub fn compute_default_allocation(&mut self) -> ApiResult<Allocation> {
        let total = self.part_number.head_count_available;
        self.compute_allocation(total)
    }

    /// 生成五种方案建议
    ///
    /// 总人数取当前分配的总人数；尚无分配时取料号可用人数
    #[instrument(skip(self), fields(part_number_id = %self.part_number.id))]
    pub fn generate_models(&mut self) -> ApiResult<Vec<OptimizationModel>> {
        let total = self
            .active
            .as_ref()
            .map(|a| a.total_personnel)
            .unwrap_or(self.part_number.head_count_available);

        let models = self
            .generator
            .generate_models(&self.part_number.id, &self.catalog, total)?;
        self.models = models.clone();
        Ok(models)
    }

    /// 应用方案建议到当前分配
    pub fn apply_model(&mut self, model_type: OptimizationType) -> ApiResult<Allocation> {
        let model = self
            .models
            .iter()
            .find(|m| m.model_type == model_type)
            .ok_or_else(|| ApiError::ModelNotAvailable(model_type.title().to_string()))?;

        let applied = match &self.active {
            Some(active) => apply_model(active, model),
            None => model.allocation.clone(),
        };
        info!(
            model = %model_type,
            run_rate = applied.run_rate,
            "已应用优化方案"
        );
        self.active = Some(applied.clone());
        Ok(applied)
    }

    /// 人工调整单个工序人数；方案建议随之失效
    pub fn update_personnel(&mut self, process_id: &str, new_value: f64) -> ApiResult<Allocation> {
        let active = self.active.as_ref().ok_or(ApiError::NoActiveAllocation)?;
        let updated = self.editor.update_personnel(active, process_id, new_value)?;
        self.replace_active(updated.clone());
        Ok(updated)
    }

    /// 方案对比（按产出降序，产出相同保持生成顺序）
    pub fn compare_models(&self) -> Vec<ModelComparison> {
        let active_rate = self.active.as_ref().map(|a| a.run_rate);
        let baseline = self.part_number.baseline_run_rate;

        let mut rows: Vec<ModelComparison> = self
            .models
            .iter()
            .map(|m| ModelComparison {
                model_type: m.model_type,
                name: m.name.clone(),
                run_rate: m.allocation.run_rate,
                bottleneck_name: m.allocation.bottleneck_name(),
                delta_vs_active: active_rate.map(|r| m.allocation.run_rate - r),
                delta_vs_baseline: (baseline > 0.0).then(|| m.allocation.run_rate - baseline),
            })
            .collect();
        rows.sort_by(|a, b| b.run_rate.total_cmp(&a.run_rate));
        rows
    }

    // ==========================================
    // 配置历史
    // ==========================================

    /// 保存当前分配的汇总快照
    pub fn save_configuration(&self) -> ApiResult<Configuration> {
        let active = self.active.as_ref().ok_or(ApiError::NoActiveAllocation)?;
        let configuration = Configuration::snapshot(active);
        self.configuration_repo.insert(&configuration)?;

        info!(
            config_id = %configuration.id,
            head_count = configuration.head_count,
            run_rate = configuration.run_rate,
            bottleneck = %configuration.bottleneck_name,
            "已保存平衡配置"
        );
        Ok(configuration)
    }

    /// 当前料号的配置历史（按创建顺序）
    pub fn list_configurations(&self) -> ApiResult<Vec<Configuration>> {
        Ok(self
            .configuration_repo
            .list_by_part_number(&self.part_number.id)?)
    }

    pub fn delete_configuration(&self, config_id: &str) -> ApiResult<()> {
        self.configuration_repo.delete(config_id)?;
        info!(config_id, "已删除平衡配置");
        Ok(())
    }

    /// 重新选中历史配置
    ///
    /// 不回放逐工序明细：以配置人数为总人数、按配置记录的方案
    /// 在当前工序目录上重新计算
    pub fn select_configuration(&mut self, config_id: &str) -> ApiResult<Allocation> {
        let configuration = self
            .configuration_repo
            .find_by_id(config_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Configuration(id={})不存在", config_id)))?;

        if configuration.part_number_id != self.part_number.id {
            return Err(ApiError::InvalidInput(format!(
                "配置{}属于料号{}, 当前料号为{}",
                config_id, configuration.part_number_id, self.part_number.id
            )));
        }

        let allocation = self.run_strategy(configuration.strategy, configuration.head_count)?;
        self.replace_active(allocation.clone());
        Ok(allocation)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn run_strategy(&self, model_type: OptimizationType, total_personnel: f64) -> ApiResult<Allocation> {
        let model = self.generator.generate(
            model_type,
            &self.part_number.id,
            &self.catalog,
            total_personnel,
        )?;
        Ok(model.allocation)
    }

    fn replace_active(&mut self, allocation: Allocation) {
        self.active = Some(allocation);
        self.models.clear();
    }
}

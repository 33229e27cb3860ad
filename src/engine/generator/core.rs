use crate::config::EngineConfig;
use crate::domain::allocation::Allocation;
use crate::domain::process::Process;
use crate::domain::types::OptimizationType;
use crate::engine::balancer::{apportion, validate_inputs, ProportionalBalancer};
use crate::engine::classifier::{KeywordClassifier, ProcessClassifier};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::greedy::GreedyOptimizer;
use crate::engine::strategy::OptimizationModel;
use crate::engine::throughput;
use tracing::{debug, info, instrument};

// ==========================================
// StrategyGenerator - 多方案生成器
// ==========================================
pub struct StrategyGenerator {
    config: EngineConfig,
    classifier: Box<dyn ProcessClassifier>,
}

impl StrategyGenerator {
    /// 使用默认的名称关键字分类器
    pub fn new(config: EngineConfig) -> Self {
        Self::with_classifier(config, Box::new(KeywordClassifier::default()))
    }

    pub fn with_classifier(config: EngineConfig, classifier: Box<dyn ProcessClassifier>) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成全部五种方案（顺序: 均衡/最大产出/关键工序/最低成本/多目标）
    #[instrument(skip(self, processes), fields(
        part_number_id = %part_number_id,
        process_count = processes.len(),
        total_personnel = total_personnel
    ))]
    pub fn generate_models(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Vec<OptimizationModel>> {
        let models = OptimizationType::ALL
            .iter()
            .map(|t| self.generate(*t, part_number_id, processes, total_personnel))
            .collect::<EngineResult<Vec<_>>>()?;

        let run_rates: Vec<f64> = models.iter().map(|m| m.allocation.run_rate).collect();
        info!(?run_rates, "优化方案生成完成");
        Ok(models)
    }

    /// 生成单个方案
    pub fn generate(
        &self,
        model_type: OptimizationType,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<OptimizationModel> {
        let allocation = match model_type {
            OptimizationType::Balanced => self.balanced(part_number_id, processes, total_personnel)?,
            OptimizationType::MaxRunRate => {
                self.max_run_rate(part_number_id, processes, total_personnel)?
            }
            OptimizationType::Critical => self.critical(part_number_id, processes, total_personnel)?,
            OptimizationType::MinCost => self.min_cost(part_number_id, processes, total_personnel)?,
            OptimizationType::MultiObjective => {
                self.multi_objective(part_number_id, processes, total_personnel)?
            }
        };
        Ok(OptimizationModel::new(
            model_type,
            self.describe(model_type),
            allocation,
        ))
    }

    fn describe(&self, model_type: OptimizationType) -> String {
        match model_type {
            OptimizationType::MultiObjective => {
                let w = &self.config.multi_objective;
                format!(
                    "均衡 {:.0}% + 最大产出 {:.0}% + 关键工序 {:.0}%，归一化至总人数",
                    w.balanced * 100.0,
                    w.max_run_rate * 100.0,
                    w.critical * 100.0
                )
            }
            other => other.description().to_string(),
        }
    }

    // ==========================================
    // 各方案
    // ==========================================

    /// 均衡: 按节拍时间比例
    pub fn balanced(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Allocation> {
        ProportionalBalancer::new(self.config.tie_break).balance(
            part_number_id,
            processes,
            total_personnel,
        )
    }

    /// 最大产出: 保底播种后反复给当前瓶颈追加人数，剩余按当前人数比例摊分
    pub fn max_run_rate(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Allocation> {
        validate_inputs(part_number_id, processes, total_personnel)?;
        ensure_positive_cycle_time(processes)?;

        let optimizer = GreedyOptimizer::new(self.config.greedy);
        let (mut assigned, remaining) = optimizer.seed(processes.len(), total_personnel);

        let manual_times: Vec<f64> = processes.iter().map(throughput::manual_time).collect();
        let outcome = optimizer.climb(&mut assigned, remaining, |i, personnel| {
            throughput::units_per_hour(manual_times[i], personnel)
        });
        debug!(
            iterations = outcome.iterations,
            remaining = outcome.remaining,
            converged = outcome.converged,
            "最大产出贪心搜索结束"
        );

        GreedyOptimizer::spread_proportionally(&mut assigned, outcome.remaining);

        Ok(self.assemble(
            part_number_id,
            processes,
            total_personnel,
            assigned,
            OptimizationType::MaxRunRate,
        ))
    }

    /// 关键工序: 按分类权重比例
    pub fn critical(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Allocation> {
        validate_inputs(part_number_id, processes, total_personnel)?;
        ensure_positive_cycle_time(processes)?;

        let weights: Vec<f64> = processes
            .iter()
            .map(|p| self.config.criticality_weights.get(self.classifier.classify(p)))
            .collect();
        let assigned = apportion(&weights, total_personnel);

        Ok(self.assemble(
            part_number_id,
            processes,
            total_personnel,
            assigned,
            OptimizationType::Critical,
        ))
    }

    /// 最低成本: 保底播种后，按成本升序排名一次性摊分剩余人数
    ///
    /// 排名第 p 位（0 起，最便宜为 0）的权重为 n - p，权重之和为 n(n+1)/2；
    /// 成本相同者按输入顺序排名
    pub fn min_cost(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Allocation> {
        validate_inputs(part_number_id, processes, total_personnel)?;
        ensure_positive_cycle_time(processes)?;

        let optimizer = GreedyOptimizer::new(self.config.greedy);
        let (mut assigned, remaining) = optimizer.seed(processes.len(), total_personnel);

        let costs: Vec<f64> = processes
            .iter()
            .map(|p| self.config.cost_per_hour.get(self.classifier.classify(p)))
            .collect();
        let mut ranked: Vec<usize> = (0..processes.len()).collect();
        ranked.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

        let n = processes.len() as f64;
        let rank_sum = n * (n + 1.0) / 2.0;
        for (position, idx) in ranked.into_iter().enumerate() {
            let weight = n - position as f64;
            assigned[idx] += remaining * weight / rank_sum;
        }

        Ok(self.assemble(
            part_number_id,
            processes,
            total_personnel,
            assigned,
            OptimizationType::MinCost,
        ))
    }

    /// 多目标: 均衡/最大产出/关键工序加权融合，再归一化至总人数
    pub fn multi_objective(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
    ) -> EngineResult<Allocation> {
        let balanced = self.balanced(part_number_id, processes, total_personnel)?;
        let max_run_rate = self.max_run_rate(part_number_id, processes, total_personnel)?;
        let critical = self.critical(part_number_id, processes, total_personnel)?;

        let w = &self.config.multi_objective;
        let blended: Vec<f64> = (0..processes.len())
            .map(|i| {
                w.balanced * balanced.entries[i].assigned_personnel
                    + w.max_run_rate * max_run_rate.entries[i].assigned_personnel
                    + w.critical * critical.entries[i].assigned_personnel
            })
            .collect();

        let blended_sum: f64 = blended.iter().sum();
        if blended_sum <= 0.0 {
            return Err(EngineError::InvalidInput(
                "多目标融合结果人数合计为 0".to_string(),
            ));
        }
        let normalized: Vec<f64> = blended
            .iter()
            .map(|a| a / blended_sum * total_personnel)
            .collect();

        Ok(self.assemble(
            part_number_id,
            processes,
            total_personnel,
            normalized,
            OptimizationType::MultiObjective,
        ))
    }

    fn assemble(
        &self,
        part_number_id: &str,
        processes: &[Process],
        total_personnel: f64,
        assigned: Vec<f64>,
        model_type: OptimizationType,
    ) -> Allocation {
        let entries = processes
            .iter()
            .zip(assigned)
            .map(|(process, personnel)| throughput::build_entry(process, personnel))
            .collect();
        throughput::finalize(
            part_number_id,
            total_personnel,
            entries,
            Some(model_type),
            self.config.tie_break,
        )
    }
}

/// 所有方案共享的前置条件：节拍时间合计必须为正
fn ensure_positive_cycle_time(processes: &[Process]) -> EngineResult<()> {
    let total: f64 = processes.iter().map(throughput::manual_time).sum();
    if total <= 0.0 {
        return Err(EngineError::InvalidInput(
            "所有工序节拍时间为 0, 无法生成方案".to_string(),
        ));
    }
    Ok(())
}

// ==========================================
// 产线平衡优化引擎 - 贪心局部搜索
// ==========================================
// 职责: 保底人数播种 + 有界的逐步追加
// 说明: 启发式算法，不保证全局最优
// 复杂度: O(n · max_iterations)
// ==========================================

use crate::config::GreedyParams;

/// 贪心搜索结果
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    pub iterations: u32, // 实际执行的追加次数
    pub remaining: f64,  // 未分配人数
    pub converged: bool, // remaining < epsilon
}

// ==========================================
// GreedyOptimizer
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct GreedyOptimizer {
    params: GreedyParams,
}

impl GreedyOptimizer {
    pub fn new(params: GreedyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GreedyParams {
        &self.params
    }

    /// 为每个工序播种保底人数
    ///
    /// 总人数不足以覆盖 n × seed_floor 时，保底人数降为 total / n，
    /// 保证合计不超过总人数
    ///
    /// # 返回
    /// (各工序人数, 剩余人数)
    pub fn seed(&self, n: usize, total: f64) -> (Vec<f64>, f64) {
        if n == 0 {
            return (Vec::new(), total);
        }
        let floor = self.params.seed_floor.min(total / n as f64);
        let assigned = vec![floor; n];
        let remaining = total - floor * n as f64;
        (assigned, remaining.max(0.0))
    }

    /// 逐步向目标函数值最低的位置追加人数
    ///
    /// 每次迭代:
    /// 1) remaining < epsilon 时停止
    /// 2) 选择 objective(i, assigned[i]) 最小者（并列取第一个）
    /// 3) 追加 min(step, remaining)
    pub fn climb<F>(&self, assigned: &mut [f64], mut remaining: f64, objective: F) -> GreedyOutcome
    where
        F: Fn(usize, f64) -> f64,
    {
        let mut iterations = 0;
        if assigned.is_empty() {
            return GreedyOutcome {
                iterations,
                remaining,
                converged: remaining < self.params.epsilon,
            };
        }

        while iterations < self.params.max_iterations {
            if remaining < self.params.epsilon {
                break;
            }

            let mut target = 0;
            let mut lowest = objective(0, assigned[0]);
            for (i, value) in assigned.iter().enumerate().skip(1) {
                let score = objective(i, *value);
                if score < lowest {
                    lowest = score;
                    target = i;
                }
            }

            let increment = self.params.step.min(remaining);
            assigned[target] += increment;
            remaining -= increment;
            iterations += 1;
        }

        GreedyOutcome {
            iterations,
            remaining,
            converged: remaining < self.params.epsilon,
        }
    }

    /// 将剩余人数按当前人数比例摊分
    pub fn spread_proportionally(assigned: &mut [f64], remaining: f64) {
        if remaining <= 0.0 {
            return;
        }
        let current: f64 = assigned.iter().sum();
        if current <= 0.0 {
            let share = remaining / assigned.len().max(1) as f64;
            assigned.iter_mut().for_each(|a| *a += share);
            return;
        }
        for a in assigned.iter_mut() {
            *a += remaining * *a / current;
        }
    }
}

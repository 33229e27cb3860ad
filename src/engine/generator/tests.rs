use super::StrategyGenerator;
use crate::config::EngineConfig;
use crate::domain::process::Process;
use crate::domain::types::{BottleneckTieBreak, OptimizationType, ProcessCategory};
use crate::engine::classifier::TaggedClassifier;
use crate::engine::error::EngineError;
use crate::engine::throughput;

// ==========================================
// 测试辅助函数
// ==========================================

const PART: &str = "PN-7734";

/// 历史记录中的 7 道工序
fn leak_test_line() -> Vec<Process> {
    [
        ("P1", "Carga de Material", 4.0),
        ("P2", "Soldadura", 22.0),
        ("P3", "Ensamblaje de Tapa", 16.0),
        ("P4", "Prueba Electrica", 21.0),
        ("P5", "Ensamblaje Final", 52.0),
        ("P6", "Inspeccion de Calidad", 22.0),
        ("P7", "Leak Test + Retrabajos", 23.0),
    ]
    .iter()
    .map(|(id, name, ct)| Process::new(*id, *name, *ct, PART))
    .collect()
}

fn line_from_cycle_times(cycle_times: &[f64]) -> Vec<Process> {
    cycle_times
        .iter()
        .enumerate()
        .map(|(i, ct)| Process::new(format!("S{}", i + 1), format!("Paso {}", i + 1), *ct, PART))
        .collect()
}

fn generator() -> StrategyGenerator {
    StrategyGenerator::new(EngineConfig::default())
}

fn assigned(allocation: &crate::domain::Allocation, process_id: &str) -> f64 {
    allocation.entry(process_id).unwrap().assigned_personnel
}

// ==========================================
// 多方案生成
// ==========================================

#[test]
fn test_generate_models_returns_all_five_in_order() {
    let models = generator().generate_models(PART, &leak_test_line(), 24.0).unwrap();

    let types: Vec<OptimizationType> = models.iter().map(|m| m.model_type).collect();
    assert_eq!(types, OptimizationType::ALL.to_vec());
    for model in &models {
        assert_eq!(model.allocation.strategy, Some(model.model_type));
        assert_eq!(model.allocation.entries.len(), 7);
        assert_eq!(model.name, model.model_type.title());
        assert!(!model.description.is_empty());
    }
}

#[test]
fn test_every_model_derives_run_rate_from_its_entries() {
    let models = generator().generate_models(PART, &leak_test_line(), 10.0).unwrap();
    for model in models {
        let allocation = &model.allocation;
        assert_eq!(allocation.run_rate, throughput::run_rate(&allocation.entries));
        let bottleneck = allocation.bottleneck().unwrap();
        assert_eq!(bottleneck.units_per_hour, allocation.run_rate);
    }
}

#[test]
fn test_generate_models_is_idempotent() {
    let g = generator();
    let first = g.generate_models(PART, &leak_test_line(), 13.0).unwrap();
    let second = g.generate_models(PART, &leak_test_line(), 13.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_generate_models_rejects_invalid_input() {
    let g = generator();
    assert!(matches!(
        g.generate_models(PART, &[], 5.0),
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        g.generate_models(PART, &line_from_cycle_times(&[0.0, 0.0, 0.0]), 5.0),
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        g.generate_models(PART, &leak_test_line(), -2.0),
        Err(EngineError::InvalidInput(_))
    ));
}

// ==========================================
// 均衡方案
// ==========================================

#[test]
fn test_balanced_regression_leak_test_line() {
    let allocation = generator().balanced(PART, &leak_test_line(), 24.0).unwrap();

    // 24 * 23 / 160 = 3.45 人, round(3600 / (23 / 3.45)) = 540
    let leak_test = allocation.entry("P7").unwrap();
    assert_eq!(leak_test.assigned_personnel, 3.45);
    assert_eq!(leak_test.units_per_hour, 540.0);
    assert_eq!(allocation.run_rate, 540.0);

    // 所有工序并列 540，Leak Test 在瓶颈候选之列
    let candidates: Vec<&str> = throughput::bottleneck_candidates(&allocation.entries)
        .iter()
        .map(|e| e.process_id.as_str())
        .collect();
    assert!(candidates.contains(&"P7"));
    assert_eq!(allocation.bottleneck_process_id.as_deref(), Some("P1"));
}

#[test]
fn test_balanced_regression_last_occurrence_names_leak_test() {
    let config = EngineConfig {
        tie_break: BottleneckTieBreak::LastOccurrence,
        ..EngineConfig::default()
    };
    let allocation = StrategyGenerator::new(config)
        .balanced(PART, &leak_test_line(), 24.0)
        .unwrap();

    assert_eq!(allocation.bottleneck_process_id.as_deref(), Some("P7"));
    assert_eq!(allocation.bottleneck_name(), "Leak Test + Retrabajos");
    assert_eq!(allocation.run_rate, 540.0);
}

#[test]
fn test_balanced_and_critical_sum_to_total() {
    let g = generator();
    let lines = [
        vec![4.0, 22.0, 16.0, 21.0, 52.0, 22.0, 23.0],
        vec![1.0, 1.0, 1.0],
        vec![7.5, 0.0, 13.25, 2.0, 9.0, 31.0, 4.4, 17.0, 6.0],
        vec![60.0],
    ];
    for cycle_times in lines.iter() {
        let processes = line_from_cycle_times(cycle_times);
        for total in [1.0, 3.0, 10.0, 24.0, 37.5] {
            let balanced = g.balanced(PART, &processes, total).unwrap();
            let critical = g.critical(PART, &processes, total).unwrap();
            assert!((balanced.assigned_total() - total).abs() <= 0.01);
            assert!((critical.assigned_total() - total).abs() <= 0.01);
        }
    }
}

// ==========================================
// 最大产出方案
// ==========================================

#[test]
fn test_max_run_rate_sums_to_total_and_keeps_floor() {
    let allocation = generator().max_run_rate(PART, &leak_test_line(), 24.0).unwrap();
    assert!((allocation.assigned_total() - 24.0).abs() <= 0.01);
    assert!(allocation.entries.iter().all(|e| e.assigned_personnel >= 0.1));
}

#[test]
fn test_max_run_rate_feeds_bottlenecks_when_converged() {
    // 剩余 3 - 0.7 = 2.3 人, 23 次追加后收敛, 不进入比例摊分
    let allocation = generator().max_run_rate(PART, &leak_test_line(), 3.0).unwrap();

    assert!((assigned(&allocation, "P1") - 0.1).abs() < 1e-9);
    assert!((assigned(&allocation, "P5") - 1.0).abs() < 1e-9);
    for entry in &allocation.entries {
        let tenths = entry.assigned_personnel * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-6);
    }
    assert!((allocation.assigned_total() - 3.0).abs() <= 0.01);
}

#[test]
fn test_max_run_rate_scales_floor_for_tiny_pool() {
    let allocation = generator().max_run_rate(PART, &leak_test_line(), 0.35).unwrap();
    assert!((allocation.assigned_total() - 0.35).abs() < 1e-9);
    for entry in &allocation.entries {
        assert!((entry.assigned_personnel - 0.05).abs() < 1e-9);
    }
}

// ==========================================
// 关键工序方案
// ==========================================

#[test]
fn test_critical_weights_quality_and_assembly() {
    let allocation = generator().critical(PART, &leak_test_line(), 24.0).unwrap();

    // 权重 [1, 1, 2, 1, 2, 3, 1], 合计 11
    let general = assigned(&allocation, "P1");
    let assembly = assigned(&allocation, "P3");
    let quality = assigned(&allocation, "P6");
    assert!((general - 24.0 / 11.0).abs() <= 0.01);
    assert!((assembly - 2.0 * 24.0 / 11.0).abs() <= 0.01);
    assert!((quality - 3.0 * 24.0 / 11.0).abs() <= 0.01);
}

#[test]
fn test_critical_with_tagged_classifier() {
    let classifier = TaggedClassifier::default().tag("P7", ProcessCategory::Quality);
    let g = StrategyGenerator::with_classifier(EngineConfig::default(), Box::new(classifier));
    let allocation = g.critical(PART, &leak_test_line(), 26.0).unwrap();

    // 权重 [1, 1, 2, 1, 2, 3, 3], 合计 13
    assert!((assigned(&allocation, "P7") - 6.0).abs() <= 0.01);
    assert!((assigned(&allocation, "P1") - 2.0).abs() <= 0.01);
}

// ==========================================
// 最低成本方案
// ==========================================

#[test]
fn test_min_cost_prefers_cheaper_processes() {
    let allocation = generator().min_cost(PART, &leak_test_line(), 24.0).unwrap();

    // 剩余 23.3 人; 排名权重 7..1, 合计 28
    // P1 (通用, 第一位) = 0.1 + 23.3 * 7 / 28
    // P6 (质量, 最后一位) = 0.1 + 23.3 * 1 / 28
    assert!((assigned(&allocation, "P1") - (0.1 + 23.3 * 7.0 / 28.0)).abs() < 1e-9);
    assert!((assigned(&allocation, "P6") - (0.1 + 23.3 / 28.0)).abs() < 1e-9);
    assert!(assigned(&allocation, "P2") > assigned(&allocation, "P3"));
    assert!(assigned(&allocation, "P5") > assigned(&allocation, "P6"));
    assert!((allocation.assigned_total() - 24.0).abs() < 1e-9);
}

// ==========================================
// 多目标方案
// ==========================================

#[test]
fn test_multi_objective_normalizes_to_total() {
    let g = generator();
    let pool = [4.0, 22.0, 16.0, 21.0, 52.0, 22.0, 23.0, 9.0];
    for size in 1..=pool.len() {
        let processes = line_from_cycle_times(&pool[..size]);
        for total in [0.5, 3.0, 24.0, 41.7] {
            let allocation = g.multi_objective(PART, &processes, total).unwrap();
            assert!(
                (allocation.assigned_total() - total).abs() < 1e-9,
                "size={} total={} sum={}",
                size,
                total,
                allocation.assigned_total()
            );
        }
    }
}

#[test]
fn test_multi_objective_blends_component_models() {
    let g = generator();
    let processes = leak_test_line();
    let balanced = g.balanced(PART, &processes, 24.0).unwrap();
    let max_run_rate = g.max_run_rate(PART, &processes, 24.0).unwrap();
    let critical = g.critical(PART, &processes, 24.0).unwrap();
    let multi = g.multi_objective(PART, &processes, 24.0).unwrap();

    let blend = |id: &str| {
        0.3 * assigned(&balanced, id) + 0.5 * assigned(&max_run_rate, id) + 0.2 * assigned(&critical, id)
    };
    let blend_sum: f64 = processes.iter().map(|p| blend(&p.id)).sum();
    for p in &processes {
        let expected = blend(&p.id) / blend_sum * 24.0;
        assert!((assigned(&multi, &p.id) - expected).abs() < 1e-9);
    }
}

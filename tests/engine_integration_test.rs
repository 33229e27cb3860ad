// ==========================================
// 引擎层集成测试
// ==========================================
// 测试目标: 比例均衡 -> 方案生成 -> 方案应用 -> 人工调整
// 说明: 不经过 API 层，直接组合引擎组件
// ==========================================


use line_balance::config::EngineConfig;
use line_balance::domain::{OptimizationType, Process};
use line_balance::engine::{
    apply_model, compute_allocation, AllocationEditor, EngineError, StrategyGenerator,
};
use test_helpers::{leak_test_line, PART};

#[test]
fn test_engine_pipeline() {
    let config = EngineConfig::default();
    let processes = leak_test_line();

    let active = compute_allocation(PART, &processes, 24.0, &config).unwrap();
    assert_eq!(active.run_rate, 540.0);

    let generator = StrategyGenerator::new(config.clone());
    let models = generator.generate_models(PART, &processes, 24.0).unwrap();
    let types: Vec<OptimizationType> = models.iter().map(|m| m.model_type).collect();
    assert_eq!(types, OptimizationType::ALL.to_vec());

    let max_rr = &models[1];
    let applied = apply_model(&active, max_rr);
    assert_eq!(applied.strategy, Some(OptimizationType::MaxRunRate));
    assert!(!applied.manually_edited);
    assert!((applied.assigned_total() - 24.0).abs() < 1e-6);

    let editor = AllocationEditor::new(config.tie_break);
    let current = applied.entry("P1").unwrap().assigned_personnel;
    let edited = editor.update_personnel(&applied, "P1", current / 2.0).unwrap();
    assert!(edited.manually_edited);
    assert!(edited.unassigned_personnel() > 0.0);
    assert_eq!(edited.run_rate, line_balance::engine::throughput::run_rate(&edited.entries));
}

#[test]
fn test_mixed_part_numbers_rejected() {
    let mut processes = leak_test_line();
    processes.push(Process::new("X1", "Empaque", 8.0, "PN-OTHER"));

    let err = compute_allocation(PART, &processes, 24.0, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert!(!err.is_validation());
}

#[test]
fn test_single_process_line() {
    let processes = vec![Process::new("S1", "Ensamblaje Unico", 30.0, PART)];
    let generator = StrategyGenerator::new(EngineConfig::default());
    let models = generator.generate_models(PART, &processes, 2.0).unwrap();

    // 单工序时所有方案都分配全部人数: round(3600 / (30 / 2)) = 240
    for model in &models {
        let entry = &model.allocation.entries[0];
        assert!((entry.assigned_personnel - 2.0).abs() < 1e-9, "{}", model.model_type);
        assert_eq!(model.allocation.run_rate, 240.0);
        assert_eq!(model.allocation.bottleneck_process_id.as_deref(), Some("S1"));
    }
}

use rc_cycles::calculate;
use rc_fluids::CoolPropProvider;
use rc_project::{load_yaml, resolve_case};
use std::path::Path;

#[test]
fn demo_plant_loads_and_every_case_solves() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/plant.yaml");
    let project =
        load_yaml(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
    assert_eq!(project.cases.len(), 7);

    let provider = CoolPropProvider::new();
    for case in &project.cases {
        let (mode, config) = resolve_case(&project, &case.id).unwrap();
        let result = calculate(&provider, mode, &config)
            .unwrap_or_else(|e| panic!("case {}: {}", case.id, e));
        assert!(result.metrics.cop > 1.0, "case {}: COP {}", case.id, result.metrics.cop);
    }
}

use marksweep::errors::StackError;
use marksweep::script::{self, Op, Outcome};
use marksweep::{Context, GcConfig, GcError, Object};

#[test]
fn run_executes_every_operation() {
    let ctx = marksweep::run("int 1; int 2; pair; int 3").expect("run");
    assert_eq!(ctx.live_count(), 4);
    assert_eq!(ctx.roots().len(), 2);
}

#[test]
fn run_reports_syntax_errors_before_executing() {
    let err = marksweep::run("int 1; explode").unwrap_err();
    assert!(matches!(err, GcError::Syntax(_)));
}

#[test]
fn run_stops_at_first_stack_error() {
    let err = marksweep::run("int 1; pair; int 2").unwrap_err();
    assert!(matches!(
        err,
        GcError::Stack(StackError::Underflow { .. })
    ));
}

#[test]
fn run_with_config_applies_threshold() {
    let config = GcConfig {
        initial_threshold: 2,
        ..GcConfig::default()
    };
    let ctx = marksweep::run_with_config("int 1; int 2; int 3", config).expect("run");
    assert_eq!(ctx.collections(), 1);
    assert_eq!(ctx.threshold(), 4);
}

#[test]
fn execute_reports_collection_record() {
    let mut ctx = Context::new();
    for op in script::parse("int 1; int 2; pair; pop").expect("parse") {
        script::execute(&mut ctx, &op).expect("execute");
    }
    let outcome = script::execute(&mut ctx, &Op::Collect).expect("collect");
    let Outcome::Collected(stats) = outcome else {
        panic!("expected a collection outcome, got {outcome:?}");
    };
    assert_eq!((stats.reclaimed, stats.remaining), (3, 0));
}

#[test]
fn slot_references_build_cycles() {
    let mut ctx = Context::new();
    let ops = script::parse("int 1; int 2; pair; settail #2 #2; sethead #2 #2").expect("parse");
    let mut last = None;
    for op in &ops {
        last = Some(script::execute(&mut ctx, op).expect("execute"));
    }
    let pair = ctx.resolve(2).expect("slot 2 is live");
    assert_eq!(
        last,
        Some(Outcome::Updated(
            pair,
            Object::Pair {
                head: pair,
                tail: pair
            }
        ))
    );
    assert_eq!(ctx.collect().reclaimed, 2);
}

#[test]
fn push_reroots_a_popped_object() {
    let mut ctx = Context::new();
    for op in script::parse("int 5; pop; push #0").expect("parse") {
        script::execute(&mut ctx, &op).expect("execute");
    }
    assert_eq!(ctx.collect().remaining, 1);
}

#[test]
fn show_on_empty_slot_is_dangling() {
    let mut ctx = Context::new();
    assert!(script::execute(&mut ctx, &Op::Show(0)).is_err());
}

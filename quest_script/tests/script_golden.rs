use quest_data::{GLOBAL_TYPE, Protocol, SchemaProvider, StepRecord};
use quest_script::{QuestEditor, compile_step, compile_steps_to_script};

fn protocol() -> Protocol {
    Protocol::from_json_str(include_str!("fixtures/protocol.json")).expect("fixture protocol parses")
}

fn village(editor: &mut QuestEditor) {
    editor.select_type("INFO");
    editor.select_npc("guard1");
    editor.set_text("wait", "5");
    editor.set_text("title", "Go");
    editor.set_text("about", "Find the well");
    editor.add_step();

    editor.select_type("KILL");
    editor.select_npc("wolf");
    editor.set_text("title", "Hunt");
    editor.set_text("about", "Clear the road");
    editor.set_text("count", "3");
    editor.set_checked("hidden", true);
    editor.add_step();

    editor.select_type(GLOBAL_TYPE);
    editor.set_checked("flag", true);
    editor.add_step();
}

#[test]
fn village_quest_matches_golden_script() {
    let mut editor = QuestEditor::new(protocol());
    village(&mut editor);
    assert_eq!(editor.script(), include_str!("fixtures/village.quest"));
}

#[test]
fn global_form_skips_any_properties() {
    let proto = protocol();
    let names: Vec<_> = proto.properties_for(GLOBAL_TYPE).into_keys().collect();
    assert_eq!(names, ["flag"]);
}

#[test]
fn info_example_serializes_exactly() {
    let record = StepRecord::new("INFO", Some("guard1"))
        .with("wait", "5")
        .with("title", "Go")
        .with("about", "Find the well");
    assert_eq!(
        compile_step(&record),
        "task:INFO\nnpcname:guard1\nwait:5\ntitle:Go\nabout:Find the well\nendtask\n"
    );
}

#[test]
fn global_records_never_get_task_lines() {
    let steps = [
        StepRecord::new(GLOBAL_TYPE, Some("guard1")).with("flag", ""),
        StepRecord::new(GLOBAL_TYPE, None),
    ];
    let script = compile_steps_to_script(&steps);
    assert!(!script.contains("task:"));
    assert!(!script.contains("endtask"));
    assert!(!script.contains("npcname"));
    assert_eq!(script, "\nflag\n\n");
}

#[test]
fn reordering_and_deleting_rewrites_script() {
    let mut editor = QuestEditor::new(protocol());
    village(&mut editor);

    assert!(editor.move_step_up(2));
    assert!(editor.move_step_up(1));
    let headings: Vec<_> = editor.rows().iter().map(|r| r.heading()).collect();
    assert_eq!(headings, ["1. GLOBAL", "2. INFO", "3. KILL"]);
    assert!(editor.script().starts_with("\nflag\n\ntask:INFO\n"));

    assert!(editor.delete_step(1).is_some());
    let headings: Vec<_> = editor.rows().iter().map(|r| r.heading()).collect();
    assert_eq!(headings, ["1. GLOBAL", "2. KILL"]);
    assert!(!editor.script().contains("task:INFO"));
}

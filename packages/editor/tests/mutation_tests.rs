//! Per-operation mutation tests

use learnpath_editor::{
    ColumnPatch, ColumnType, IdGenerator, Mutation, MutationError, MutationOutcome, Path,
    SectionContent, SectionType, DEFAULT_ITEM_TITLE,
};

fn new_path() -> (Path, IdGenerator, String) {
    let mut ids = IdGenerator::sequential("m");
    let path = Path::new("Math", &mut ids);
    let root_id = path.root_column().unwrap().id.clone();
    (path, ids, root_id)
}

fn apply(path: &mut Path, ids: &mut IdGenerator, mutation: Mutation) -> MutationOutcome {
    mutation.apply(path, ids)
}

fn last_item_id(path: &Path, column_id: &str) -> String {
    path.column(column_id).unwrap().items.last().unwrap().id.clone()
}

fn last_column_id(path: &Path) -> String {
    path.columns.last().unwrap().id.clone()
}

#[test]
fn test_math_scenario() {
    let (mut path, mut ids, root) = new_path();
    assert!(path.column(&root).unwrap().items.is_empty());

    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let items = &path.column(&root).unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, DEFAULT_ITEM_TITLE);
    let item_id = items[0].id.clone();

    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id.clone(),
            column_type: ColumnType::Dynamic,
        },
    );
    let child = path.child_column(&item_id).unwrap();
    assert_eq!(child.parent_item_id.as_deref(), Some(item_id.as_str()));
    assert_eq!(child.title, "New Topic");
    assert_eq!(child.column_type, ColumnType::Dynamic);

    apply(
        &mut path,
        &mut ids,
        Mutation::UpdateItem {
            column_id: root.clone(),
            item_id: item_id.clone(),
            title: "Algebra".to_string(),
        },
    );
    assert_eq!(path.child_column(&item_id).unwrap().title, "Algebra");

    apply(
        &mut path,
        &mut ids,
        Mutation::DeleteItem {
            column_id: root.clone(),
            item_id: item_id.clone(),
        },
    );
    assert!(path.child_column(&item_id).is_none());
    assert!(path.column(&root).unwrap().items.is_empty());
    assert_eq!(path.columns.len(), 1);
}

#[test]
fn test_column_title_syncs_to_owning_item() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id.clone(),
            column_type: ColumnType::Branch,
        },
    );
    let child_id = last_column_id(&path);

    let outcome = apply(
        &mut path,
        &mut ids,
        Mutation::UpdateColumn {
            column_id: child_id.clone(),
            patch: ColumnPatch::title("Geometry"),
        },
    );

    assert!(outcome.is_applied());
    assert_eq!(path.column(&child_id).unwrap().title, "Geometry");
    assert_eq!(path.item(&item_id).unwrap().title, "Geometry");
}

#[test]
fn test_root_title_edit_touches_no_item() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });

    apply(
        &mut path,
        &mut ids,
        Mutation::UpdateColumn {
            column_id: root.clone(),
            patch: ColumnPatch::title("Semester 1"),
        },
    );

    assert_eq!(path.column(&root).unwrap().title, "Semester 1");
    assert_eq!(path.column(&root).unwrap().items[0].title, DEFAULT_ITEM_TITLE);
}

#[test]
fn test_width_only_patch_keeps_title() {
    let (mut path, mut ids, root) = new_path();

    apply(
        &mut path,
        &mut ids,
        Mutation::UpdateColumn {
            column_id: root.clone(),
            patch: ColumnPatch::width(480.0),
        },
    );

    let col = path.column(&root).unwrap();
    assert_eq!(col.width, 480.0);
    assert_eq!(col.title, "Phase");
}

#[test]
fn test_bullets_section_add_then_delete() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id,
            column_type: ColumnType::Dynamic,
        },
    );
    let col = last_column_id(&path);
    let before = path.column(&col).unwrap().sections.len();

    apply(
        &mut path,
        &mut ids,
        Mutation::AddSection {
            column_id: col.clone(),
            section_type: SectionType::Bullets,
        },
    );
    let section = path.column(&col).unwrap().sections.last().unwrap().clone();
    assert_eq!(
        section.content,
        SectionContent::Bullets {
            ordered: false,
            items: vec!["First item".to_string()],
        }
    );

    apply(
        &mut path,
        &mut ids,
        Mutation::DeleteSection {
            column_id: col.clone(),
            section_id: section.id,
        },
    );
    assert_eq!(path.column(&col).unwrap().sections.len(), before);
}

#[test]
fn test_add_section_rejected_on_branch_column() {
    let (mut path, mut ids, root) = new_path();
    let before = path.clone();

    let outcome = apply(
        &mut path,
        &mut ids,
        Mutation::AddSection {
            column_id: root.clone(),
            section_type: SectionType::Heading,
        },
    );

    assert_eq!(outcome, MutationOutcome::Rejected(MutationError::NotDynamic(root)));
    assert_eq!(path, before);
}

#[test]
fn test_update_section_content_replaces_wholesale() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id,
            column_type: ColumnType::Dynamic,
        },
    );
    let col = last_column_id(&path);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddSection {
            column_id: col.clone(),
            section_type: SectionType::Qanda,
        },
    );
    let section_id = path.column(&col).unwrap().sections[0].id.clone();

    let replacement = SectionContent::Qanda {
        question: "What is x?".to_string(),
        answer: "42".to_string(),
        is_collapsed: true,
    };
    let outcome = apply(
        &mut path,
        &mut ids,
        Mutation::UpdateSectionContent {
            column_id: col.clone(),
            section_id: section_id.clone(),
            content: replacement.clone(),
        },
    );
    assert!(outcome.is_applied());
    assert_eq!(path.column(&col).unwrap().sections[0].content, replacement);

    let mismatched = apply(
        &mut path,
        &mut ids,
        Mutation::UpdateSectionContent {
            column_id: col.clone(),
            section_id,
            content: SectionContent::default_for(SectionType::Paragraph),
        },
    );
    assert!(matches!(
        mismatched,
        MutationOutcome::Rejected(MutationError::ContentTypeMismatch { .. })
    ));
    assert_eq!(path.column(&col).unwrap().sections[0].content, replacement);
}

#[test]
fn test_reorder_keeps_floating_at_end() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id,
            column_type: ColumnType::Dynamic,
        },
    );
    let col = last_column_id(&path);
    for section_type in [
        SectionType::Heading,
        SectionType::Floating,
        SectionType::Paragraph,
        SectionType::Image,
    ] {
        apply(
            &mut path,
            &mut ids,
            Mutation::AddSection {
                column_id: col.clone(),
                section_type,
            },
        );
    }
    let sections = path.column(&col).unwrap().sections.clone();
    let (heading, floating, paragraph, image) = (
        sections[0].id.clone(),
        sections[1].id.clone(),
        sections[2].id.clone(),
        sections[3].id.clone(),
    );

    apply(
        &mut path,
        &mut ids,
        Mutation::UpdateSectionsOrder {
            column_id: col.clone(),
            order: vec![image.clone(), heading.clone(), paragraph.clone()],
        },
    );

    let order: Vec<_> = path
        .column(&col)
        .unwrap()
        .sections
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(order, vec![image, heading, paragraph, floating]);
}

#[test]
fn test_add_column_for_missing_item_uses_fallback_title() {
    let (mut path, mut ids, _) = new_path();

    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: "ghost".to_string(),
            column_type: ColumnType::Branch,
        },
    );
    assert_eq!(path.columns.last().unwrap().title, "New Phase");

    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: "ghost-2".to_string(),
            column_type: ColumnType::Dynamic,
        },
    );
    assert_eq!(path.columns.last().unwrap().title, "New Content");
}

#[test]
fn test_second_column_for_same_item_is_rejected() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    let add = Mutation::AddColumn {
        parent_item_id: item_id,
        column_type: ColumnType::Dynamic,
    };

    assert!(apply(&mut path, &mut ids, add.clone()).is_applied());
    let outcome = apply(&mut path, &mut ids, add);

    assert!(matches!(
        outcome,
        MutationOutcome::Rejected(MutationError::ItemAlreadyOwnsColumn { .. })
    ));
    assert_eq!(path.columns.len(), 2);
    assert!(path.validate().is_ok());
}

#[test]
fn test_add_branch_from_dynamic_column() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id,
            column_type: ColumnType::Dynamic,
        },
    );
    let dynamic = last_column_id(&path);

    let outcome = apply(
        &mut path,
        &mut ids,
        Mutation::AddBranchFromDynamicColumn {
            column_id: dynamic.clone(),
        },
    );
    assert!(outcome.is_applied());

    let new_item = path.column(&dynamic).unwrap().items[0].clone();
    assert_eq!(new_item.title, "New Content");
    let child = path.child_column(&new_item.id).unwrap();
    assert_eq!(child.column_type, ColumnType::Dynamic);
    assert_eq!(child.title, new_item.title);

    // Neither half happens on a BRANCH column
    let before = path.clone();
    let rejected = apply(
        &mut path,
        &mut ids,
        Mutation::AddBranchFromDynamicColumn { column_id: root },
    );
    assert!(matches!(rejected, MutationOutcome::Rejected(_)));
    assert_eq!(path, before);
}

#[test]
fn test_stale_ids_are_noops() {
    let (mut path, mut ids, root) = new_path();
    let before = path.clone();

    let stale = vec![
        Mutation::AddItem {
            column_id: "gone".to_string(),
        },
        Mutation::UpdateItem {
            column_id: root.clone(),
            item_id: "gone".to_string(),
            title: "x".to_string(),
        },
        Mutation::DeleteItem {
            column_id: "gone".to_string(),
            item_id: "gone".to_string(),
        },
        Mutation::UpdateColumn {
            column_id: "gone".to_string(),
            patch: ColumnPatch::title("x"),
        },
        Mutation::DeleteSection {
            column_id: root.clone(),
            section_id: "gone".to_string(),
        },
        Mutation::UpdateSectionsOrder {
            column_id: "gone".to_string(),
            order: vec![],
        },
        Mutation::DeleteColumn {
            column_id: "gone".to_string(),
        },
        Mutation::AddBranchFromDynamicColumn {
            column_id: "gone".to_string(),
        },
    ];

    for mutation in stale {
        // Twice, to show repeated stale calls stay harmless
        for _ in 0..2 {
            let outcome = apply(&mut path, &mut ids, mutation.clone());
            assert!(matches!(outcome, MutationOutcome::Noop(_)), "{:?}", mutation);
        }
    }
    assert_eq!(path, before);
}

#[test]
fn test_root_column_cannot_be_deleted() {
    let (mut path, mut ids, root) = new_path();

    let outcome = apply(&mut path, &mut ids, Mutation::DeleteColumn { column_id: root });

    assert_eq!(outcome, MutationOutcome::Rejected(MutationError::RootColumn));
    assert_eq!(path.columns.len(), 1);
}

#[test]
fn test_delete_column_removes_subtree_but_keeps_item() {
    let (mut path, mut ids, root) = new_path();
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: root.clone() });
    let item_id = last_item_id(&path, &root);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: item_id.clone(),
            column_type: ColumnType::Branch,
        },
    );
    let branch = last_column_id(&path);
    apply(&mut path, &mut ids, Mutation::AddItem { column_id: branch.clone() });
    let nested_item = last_item_id(&path, &branch);
    apply(
        &mut path,
        &mut ids,
        Mutation::AddColumn {
            parent_item_id: nested_item,
            column_type: ColumnType::Dynamic,
        },
    );
    assert_eq!(path.columns.len(), 3);

    apply(&mut path, &mut ids, Mutation::DeleteColumn { column_id: branch });

    assert_eq!(path.columns.len(), 1);
    assert!(path.item(&item_id).is_some());
}

#[test]
fn test_rename_path() {
    let (mut path, mut ids, _) = new_path();

    apply(
        &mut path,
        &mut ids,
        Mutation::RenamePath {
            title: "Physics".to_string(),
        },
    );

    assert_eq!(path.title, "Physics");
}

#[test]
fn test_applied_to_leaves_source_untouched() {
    let (path, mut ids, root) = new_path();

    let (next, outcome) = Mutation::AddItem { column_id: root.clone() }.applied_to(&path, &mut ids);

    assert!(outcome.is_applied());
    assert!(path.column(&root).unwrap().items.is_empty());
    assert_eq!(next.column(&root).unwrap().items.len(), 1);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Cadence, DomainError, Member, ShiftDescriptor, TaskDefinition, validate_member,
    validate_member_ids_unique, validate_task_definition,
};

#[test]
fn test_valid_member_passes() {
    let member: Member = Member::new("m1", "Alice").always_available();
    assert!(validate_member(&member).is_ok());
}

#[test]
fn test_empty_member_id_rejected() {
    let member: Member = Member::new("   ", "Alice");
    assert!(matches!(
        validate_member(&member),
        Err(DomainError::InvalidMemberId(_))
    ));
}

#[test]
fn test_empty_name_rejected() {
    let member: Member = Member::new("m1", "  ");
    assert!(matches!(
        validate_member(&member),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_out_of_range_weekday_rejected() {
    let member: Member = Member::new("m1", "Alice").with_weekly_pattern([0, 7]);
    let result: Result<(), DomainError> = validate_member(&member);

    assert!(matches!(
        result,
        Err(DomainError::InvalidWeekday { value: 7, .. })
    ));
}

#[test]
fn test_deserialized_inverted_range_rejected() {
    let member: Member = serde_json::from_str(
        r#"{
            "id": "m1",
            "name": "Alice",
            "unavailable_ranges": [{"start": "2026-02-10", "end": "2026-02-01"}]
        }"#,
    )
    .unwrap();

    assert!(matches!(
        validate_member(&member),
        Err(DomainError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_duplicate_member_ids_rejected() {
    let members: Vec<Member> = vec![
        Member::new("m1", "Alice"),
        Member::new("m2", "Bob"),
        Member::new(" m1", "Alice Again"),
    ];

    let result: Result<(), DomainError> = validate_member_ids_unique(&members);
    assert!(matches!(result, Err(DomainError::DuplicateMemberId(id)) if id.value() == "m1"));
    assert!(validate_member_ids_unique(&members[..2]).is_ok());
}

#[test]
fn test_task_definition_validation() {
    let valid: TaskDefinition = TaskDefinition::new("Late Cover", Cadence::Daily)
        .with_shift(ShiftDescriptor::new("Late", "18:00", "22:00"));
    assert!(validate_task_definition(&valid).is_ok());

    let unnamed: TaskDefinition = TaskDefinition::new(" ", Cadence::Weekly);
    assert!(matches!(
        validate_task_definition(&unnamed),
        Err(DomainError::InvalidTaskName(_))
    ));

    let bad_shift: TaskDefinition = TaskDefinition::new("Late Cover", Cadence::Daily)
        .with_shift(ShiftDescriptor::new("Late", "18:00", "late"));
    assert!(validate_task_definition(&bad_shift).is_err());
}

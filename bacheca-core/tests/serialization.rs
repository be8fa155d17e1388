use bacheca_core::*;
use serde_json::{self as json, Value};
use time::macros::datetime;

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

fn sample_message() -> GroupMessage {
    GroupMessage {
        group_id: 98000001,
        text: "Standby for fleet ops".to_string(),
        source_url: Some("https://example.com/motd".to_string()),
        updated_at: datetime!(2025-11-02 10:20:30.5 UTC),
        updated_by: Some(MemberRef { member_id: 1001, name: Some("Erik".to_string()) }),
    }
}

/*
    Obiettivo test: il messaggio viaggia in camelCase con updatedAt in RFC3339
    e torna identico dopo la deserializzazione.
*/
#[test]
fn group_message_wire_shape() {
    let m = sample_message();
    let s = json::to_string(&m).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["groupId"], 98000001);
    assert_eq!(v["text"], "Standby for fleet ops");
    assert_eq!(v["sourceUrl"], "https://example.com/motd");
    assert_eq!(v["updatedAt"], "2025-11-02T10:20:30.5Z");
    assert_eq!(v["updatedBy"]["memberId"], 1001);
    assert_eq!(v["updatedBy"]["name"], "Erik");

    let back: GroupMessage = json::from_str(&s).expect("deserialize");
    assert_eq!(back, m);
}

/*
    I campi opzionali assenti non vengono serializzati e tornano None,
    mai come stringa vuota.
*/
#[test]
fn absent_optionals_are_omitted() {
    let m = GroupMessage { source_url: None, updated_by: None, ..sample_message() };
    let s = json::to_string(&m).expect("serialize");
    let v = parse(&s);

    assert!(v.get("sourceUrl").is_none());
    assert!(v.get("updatedBy").is_none());

    let back: GroupMessage = json::from_str(&s).expect("deserialize");
    assert_eq!(back.source_url, None);
    assert_eq!(back.updated_by, None);
}

#[test]
fn update_request_without_source_url() {
    let req: UpdateMessageRequest =
        json::from_str(r#"{"memberId": 1001, "text": "hello"}"#).expect("deserialize");
    assert_eq!(req.member_id, 1001);
    assert_eq!(req.text, "hello");
    assert_eq!(req.source_url, None);
}

#[test]
fn board_without_message_or_editor() {
    let board = MessageBoard { group_id: 7, message: None, editor: None };
    let v = parse(&json::to_string(&BoardResponse { board: board.clone() }).expect("serialize"));

    assert_eq!(v["board"]["groupId"], 7);
    assert!(v["board"].get("message").is_none());
    assert!(v["board"].get("editor").is_none());
    assert!(!board.can_edit());
}

#[test]
fn member_without_affiliation_belongs_nowhere() {
    let m: Member = json::from_str(r#"{"memberId": 5, "name": "Drifter"}"#).expect("deserialize");
    assert_eq!(m.group_id, None);
    assert!(!m.belongs_to(0));
    assert!(!m.belongs_to(10));
}

#[test]
fn member_role_uses_snake_case_tags() {
    let r = MemberRole { member_id: 5, role: Role::PersonnelManager, granted: true };
    let v = parse(&json::to_string(&r).expect("serialize"));
    assert_eq!(v["role"], "personnel_manager");
    assert_eq!(v["granted"], true);
}

/*
    L'envelope di errore omette details quando assente.
*/
#[test]
fn error_envelope_omits_details() {
    let e = Error::new(error::CODE_NOT_FOUND, "get group message 7: not found");
    let v = parse(&json::to_string(&e).expect("serialize"));
    assert_eq!(v["code"], "not_found");
    assert!(v.get("details").is_none());

    let back: Error = json::from_str(&json::to_string(&e).unwrap()).expect("deserialize");
    assert!(back.is_not_found());
}

#[test]
fn timestamps_keep_subsecond_precision() {
    let ts = datetime!(2025-11-02 10:20:30.123456789 UTC);
    let s = format_timestamp(ts).expect("format");
    assert_eq!(s, "2025-11-02T10:20:30.123456789Z");
    assert_eq!(parse_timestamp(&s).expect("parse"), ts);
}

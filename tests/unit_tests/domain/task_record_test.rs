use serde_json::json;

use voice_estimate::domain::{
    CatalogMatch, ExtractionResult, MISSING_QUANTITY, MISSING_ROOM, Quantity, TaskRecord,
};

fn record(value: serde_json::Value) -> TaskRecord {
    serde_json::from_value::<TaskRecord>(value).unwrap().normalize()
}

#[test]
fn given_numeric_quantity_when_parsing_then_quantity_is_numeric() {
    let task = record(json!({
        "room_name": "Salon",
        "task_name": "Peindre les murs",
        "id": "PEINT-STD",
        "quantity": 27.5,
        "unit": "m²"
    }));

    assert_eq!(task.quantity, Quantity::Numeric(27.5));
    assert_eq!(task.id, CatalogMatch::Matched("PEINT-STD".to_string()));
    assert_eq!(task.hypotheses, None);
}

#[test]
fn given_integer_quantity_when_parsing_then_quantity_is_numeric() {
    let task = record(json!({
        "room_name": "Cuisine",
        "task_name": "Remplacer les prises",
        "quantity": 4,
        "unit": "u"
    }));

    assert_eq!(task.quantity.as_f64(), Some(4.0));
}

#[test]
fn given_french_decimal_string_when_parsing_quantity_then_it_is_numeric() {
    let task = record(json!({
        "room_name": "Chambre",
        "task_name": "Poser de la moquette",
        "quantity": "12,5",
        "unit": "m²"
    }));

    assert_eq!(task.quantity, Quantity::Numeric(12.5));
}

#[test]
fn given_missing_quantity_sentinel_without_question_when_normalizing_then_question_is_added() {
    let task = record(json!({
        "room_name": "Salle de bain",
        "task_name": "Carrelage mural",
        "quantity": MISSING_QUANTITY,
        "unit": "m²"
    }));

    assert!(task.quantity.is_unresolved());
    let question = task.hypotheses.unwrap();
    assert!(!question.is_empty());
}

#[test]
fn given_free_text_quantity_when_normalizing_then_reason_becomes_hypothesis() {
    let task = record(json!({
        "room_name": "Entrée",
        "task_name": "Peinture plafond",
        "quantity": "surface à mesurer sur place",
        "unit": "m²"
    }));

    assert_eq!(
        task.quantity,
        Quantity::Unresolved("surface à mesurer sur place".to_string())
    );
    assert_eq!(
        task.hypotheses.as_deref(),
        Some("surface à mesurer sur place")
    );
}

#[test]
fn given_unresolved_quantity_when_serialized_then_sentinel_is_written() {
    let task = record(json!({
        "room_name": "Entrée",
        "task_name": "Peinture plafond",
        "quantity": "surface à mesurer sur place",
        "unit": "m²",
        "hypotheses": "Quelle est la surface du plafond ?"
    }));

    let json = serde_json::to_value(&task).unwrap();

    assert_eq!(json["quantity"], MISSING_QUANTITY);
    assert_eq!(json["hypotheses"], "Quelle est la surface du plafond ?");
}

#[test]
fn given_absent_null_or_sentinel_id_when_parsing_then_match_is_missing() {
    for id in [json!(null), json!(""), json!("Missing"), json!("missing")] {
        let task = record(json!({
            "room_name": "Salon",
            "task_name": "Dépose de cloison",
            "id": id,
            "quantity": 8,
            "unit": "m²"
        }));
        assert!(task.id.is_missing());
    }

    let without_id = record(json!({
        "room_name": "Salon",
        "task_name": "Dépose de cloison",
        "quantity": 8,
        "unit": "m²"
    }));
    assert!(without_id.id.is_missing());
    assert_eq!(serde_json::to_value(&without_id).unwrap()["id"], "Missing");
}

#[test]
fn given_blank_room_and_description_when_normalizing_then_room_sentinel_and_no_description() {
    let task = record(json!({
        "room_name": "  ",
        "task_name": "Ponçage parquet",
        "description": " ",
        "quantity": 20,
        "unit": "m²"
    }));

    assert_eq!(task.room_name, MISSING_ROOM);
    assert_eq!(task.description, None);

    let json = serde_json::to_value(&task).unwrap();
    assert!(json.get("description").is_none());
    assert!(json.get("hypotheses").is_none());
}

#[test]
fn given_record_without_required_unit_when_parsing_then_fails() {
    let result = serde_json::from_value::<TaskRecord>(json!({
        "room_name": "Salon",
        "task_name": "Peindre les murs",
        "quantity": 30
    }));

    assert!(result.is_err());
}

#[test]
fn given_extraction_result_when_normalizing_then_every_task_is_normalized() {
    let result: ExtractionResult = serde_json::from_value(json!({
        "tasks": [
            { "room_name": "", "task_name": "A", "quantity": 1, "unit": "u" },
            { "room_name": "Salon", "task_name": "B", "quantity": "QUANTITÉ MANQUANTE", "unit": "m²" }
        ]
    }))
    .unwrap();

    let normalized = result.normalize();

    assert_eq!(normalized.tasks[0].room_name, MISSING_ROOM);
    assert!(normalized.tasks[1].hypotheses.is_some());
}

#[test]
fn given_numeric_catalog_id_when_parsing_then_id_is_kept_as_string() {
    let task = record(json!({
        "room_name": "Salon",
        "task_name": "Peindre",
        "id": 12,
        "quantity": 35,
        "unit": "m²"
    }));

    assert_eq!(task.id, CatalogMatch::Matched("12".to_string()));
    assert_eq!(serde_json::to_value(&task).unwrap()["id"], "12");
}

#[test]
fn given_non_scalar_catalog_id_when_parsing_then_match_is_missing() {
    for id in [json!(true), json!(["PEINT-STD"]), json!({"code": "PEINT-STD"})] {
        let task = record(json!({
            "room_name": "Salon",
            "task_name": "Peindre",
            "id": id,
            "quantity": 35,
            "unit": "m²"
        }));
        assert!(task.id.is_missing());
    }
}

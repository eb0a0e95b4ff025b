#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use reversi_rules::wasm;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(wasm::wasm_ready());
}

#[wasm_bindgen_test]
fn new_session_with_defaults_starts_eight_by_eight() {
    let state = wasm::new_session(JsValue::UNDEFINED).unwrap();

    assert_eq!(field(&state, "size").as_f64(), Some(8.0));
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(field(&state, "black_count").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn place_and_export_round_trip() {
    let config = js_sys::Object::new();
    Reflect::set(&config, &"board_size".into(), &JsValue::from_f64(4.0)).unwrap();
    wasm::new_session(config.into()).unwrap();

    let report = wasm::place(0, 1).unwrap();
    assert_eq!(field(&report, "accepted").as_bool(), Some(true));

    let line = wasm::export_session().unwrap();
    assert_eq!(line, "Black;0;White;0;1;4;-1,b1,-3,b2,-2,b1,w1,-5");

    wasm::import_session(&line).unwrap();
    assert_eq!(wasm::piece_at(1, 1).unwrap(), 1);
}

#[wasm_bindgen_test]
fn import_rejects_malformed_line() {
    wasm::new_session(JsValue::UNDEFINED).unwrap();

    assert!(wasm::import_session("Black;0;White;0;0;4;b1,w1,-2").is_err());
    assert!(wasm::piece_at(-1, 0).is_err());
}

use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::*;

fn bridge_object(global_name: &str) -> Option<JsValue> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(global_name)).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

pub fn bridge_present(global_name: &str) -> bool {
    bridge_object(global_name).is_some()
}

pub async fn invoke_method(
    global_name: &str,
    method: &str,
    arg: Option<&Value>,
) -> Result<Value, TransportError> {
    let bridge = bridge_object(global_name)
        .ok_or_else(|| TransportError::Fault(format!("window.{global_name} is not available")))?;
    let member = Reflect::get(&bridge, &JsValue::from_str(method))
        .map_err(|err| TransportError::Fault(js_error_to_string(err)))?;
    let function: Function = member
        .dyn_into()
        .map_err(|_| TransportError::MissingMethod(method.to_string()))?;

    let returned = match arg {
        Some(arg) => {
            let arg = arg
                .serialize(&Serializer::json_compatible())
                .map_err(|err| TransportError::Fault(err.to_string()))?;
            function.call1(&bridge, &arg)
        }
        None => function.call0(&bridge),
    }
    .map_err(|err| TransportError::Rejected(js_error_to_string(err)))?;

    // Bridge methods may return a plain value instead of a promise.
    let resolved = JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(|err| TransportError::Rejected(js_error_to_string(err)))?;
    if resolved.is_undefined() || resolved.is_null() {
        return Ok(Value::Null);
    }
    from_value(resolved).map_err(|err| TransportError::Fault(err.to_string()))
}

pub async fn wait_for_bridge(
    global_name: &str,
    ready_event: &str,
    timeout_ms: u32,
) -> BridgePresence {
    if bridge_present(global_name) {
        return BridgePresence::Ready;
    }
    let Some(window) = web_sys::window() else {
        return BridgePresence::Missing;
    };
    let Some(document) = window.document() else {
        return BridgePresence::Missing;
    };

    let (sender, receiver) = oneshot::channel::<BridgePresence>();
    let sender = Rc::new(RefCell::new(Some(sender)));
    let settle = move |presence: BridgePresence| {
        let sender = Rc::clone(&sender);
        move || {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(presence);
            }
        }
    };
    let on_ready = Closure::<dyn FnMut()>::new(settle(BridgePresence::Ready));
    let on_timeout = Closure::<dyn FnMut()>::new(settle(BridgePresence::Missing));

    let listening = document
        .add_event_listener_with_callback(ready_event, on_ready.as_ref().unchecked_ref())
        .is_ok();
    let timer = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            on_timeout.as_ref().unchecked_ref(),
            i32::try_from(timeout_ms).unwrap_or(i32::MAX),
        )
        .ok();
    if !listening && timer.is_none() {
        return BridgePresence::Missing;
    }

    let presence = receiver.await.unwrap_or(BridgePresence::Missing);

    if listening {
        let _ = document
            .remove_event_listener_with_callback(ready_event, on_ready.as_ref().unchecked_ref());
    }
    if let Some(timer) = timer {
        window.clear_timeout_with_handle(timer);
    }

    // A bridge injected without announcing itself still counts once the timeout fires.
    if presence == BridgePresence::Missing && bridge_present(global_name) {
        BridgePresence::Ready
    } else {
        presence
    }
}

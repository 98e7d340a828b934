//! Stripe.js bindings and the card widget

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use sponsor_payments::{ConfirmedPayment, PaymentError, PaymentWidget, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom;

#[wasm_bindgen]
extern "C" {
    type StripeJs;

    #[wasm_bindgen(js_name = Stripe, catch)]
    fn init_stripe(publishable_key: &str) -> std::result::Result<StripeJs, JsValue>;

    #[wasm_bindgen(method)]
    fn elements(this: &StripeJs) -> Elements;

    #[wasm_bindgen(method, js_name = confirmCardPayment)]
    fn confirm_card_payment(this: &StripeJs, client_secret: &str, data: &JsValue) -> js_sys::Promise;

    type Elements;

    #[wasm_bindgen(method)]
    fn create(this: &Elements, kind: &str, options: &JsValue) -> CardElement;

    type CardElement;

    #[wasm_bindgen(method)]
    fn mount(this: &CardElement, selector: &str);

    #[wasm_bindgen(method)]
    fn on(this: &CardElement, event: &str, handler: &js_sys::Function);
}

/// Where Stripe injects its iframe
const CARD_MOUNT: &str = "#card-element";

/// Card input state reported by the widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardChange {
    pub empty: bool,
    pub error: Option<String>,
}

type ChangeHandler = Rc<dyn Fn(CardChange)>;

struct Mounted {
    stripe: StripeJs,
    card: CardElement,
}

/// Stripe card element implementing [`PaymentWidget`]
#[derive(Clone)]
pub struct StripeCard {
    publishable_key: String,
    on_change: ChangeHandler,
    mounted: Rc<RefCell<Option<Mounted>>>,
}

impl StripeCard {
    pub fn new(publishable_key: impl Into<String>, on_change: impl Fn(CardChange) + 'static) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            on_change: Rc::new(on_change),
            mounted: Rc::new(RefCell::new(None)),
        }
    }

    fn listen(&self, card: &CardElement) {
        let on_change = Rc::clone(&self.on_change);
        let closure = Closure::wrap(Box::new(move |ev: JsValue| {
            let empty = read_bool(&ev, "empty");
            let error = read_path(&ev, &["error", "message"]);
            on_change(CardChange { empty, error });
        }) as Box<dyn FnMut(JsValue)>);
        card.on("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn card_style() -> std::result::Result<JsValue, serde_wasm_bindgen::Error> {
    json!({
        "style": {
            "base": {
                "color": "#32325d",
                "fontFamily": "Arial, sans-serif",
                "fontSmoothing": "antialiased",
                "fontSize": "16px",
                "::placeholder": { "color": "#32325d" }
            },
            "invalid": {
                "fontFamily": "Arial, sans-serif",
                "color": "#fa755a",
                "iconColor": "#fa755a"
            }
        }
    })
    .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn read_path(value: &JsValue, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value.clone(), |current, key| {
            js_sys::Reflect::get(&current, &JsValue::from_str(key))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
        })?
        .as_string()
}

fn read_bool(value: &JsValue, key: &str) -> bool {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

fn widget_error(err: &JsValue) -> PaymentError {
    PaymentError::Widget(dom::js_error(err))
}

#[async_trait(?Send)]
impl PaymentWidget for StripeCard {
    async fn mount(&self) -> Result<()> {
        if self.publishable_key.is_empty() {
            return Err(PaymentError::Widget("no publishable key configured".into()));
        }
        let stripe = init_stripe(&self.publishable_key).map_err(|e| widget_error(&e))?;
        let options = card_style().map_err(|e| PaymentError::Widget(e.to_string()))?;
        let card = stripe.elements().create("card", &options);
        card.mount(CARD_MOUNT);
        self.listen(&card);

        tracing::info!("card element mounted");
        *self.mounted.borrow_mut() = Some(Mounted { stripe, card });
        Ok(())
    }

    async fn confirm(&self, client_secret: &str) -> Result<ConfirmedPayment> {
        let promise = {
            let mounted = self.mounted.borrow();
            let Some(Mounted { stripe, card }) = mounted.as_ref() else {
                return Err(PaymentError::Widget("card element not mounted".into()));
            };

            let payment_method = js_sys::Object::new();
            js_sys::Reflect::set(&payment_method, &JsValue::from_str("card"), card)
                .map_err(|e| widget_error(&e))?;
            let data = js_sys::Object::new();
            js_sys::Reflect::set(&data, &JsValue::from_str("payment_method"), &payment_method)
                .map_err(|e| widget_error(&e))?;

            stripe.confirm_card_payment(client_secret, &data)
        };

        let result = JsFuture::from(promise).await.map_err(|e| widget_error(&e))?;

        if let Some(message) = read_path(&result, &["error", "message"]) {
            return Err(PaymentError::Card(message));
        }
        let payment_intent_id = read_path(&result, &["paymentIntent", "id"])
            .ok_or_else(|| PaymentError::Widget("confirmation returned no payment intent".into()))?;
        Ok(ConfirmedPayment { payment_intent_id })
    }
}

//! Macro utilitaria para declarar inputs de step sin boilerplate.
//!
//! Exportada en la raíz del crate:
//!   use flow_core::step_input;
//!   let input = step_input! { "imageId" => image, "labels" => vec!["the shirt cloth"] };

/// Construye un `StepInput` a partir de pares `"clave" => valor`. Los valores
/// aceptan cualquier tipo con `Into<InputValue>` (literales, `DeferredResult`,
/// vectores y opcionales).
#[macro_export]
macro_rules! step_input {
    () => {
        $crate::model::StepInput::new()
    };
    ($($key:literal => $value:expr),+ $(,)?) => {{
        let mut input = $crate::model::StepInput::new();
        $( input.insert($key, $value); )+
        input
    }};
}

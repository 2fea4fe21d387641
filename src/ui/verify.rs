/// E-mail verification step shown after registration

use crate::account::AccountRegistry;
use crate::ui::View;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VerifyPageProps {
    pub registry: AccountRegistry,
    pub on_navigate: Callback<View>,
}

#[function_component(VerifyPage)]
pub fn verify_page(props: &VerifyPageProps) -> Html {
    let code = use_state(String::new);
    let error = use_state(|| None::<String>);

    let email = match props.registry.pending_verification() {
        Ok(pending) => pending.map(|p| p.email),
        Err(e) => {
            log::error!("failed to read pending verification: {}", e);
            None
        }
    };

    let on_code_input = {
        let code = code.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                code.set(input.value());
                error.set(None);
            }
        })
    };

    let on_verify = {
        let registry = props.registry.clone();
        let on_navigate = props.on_navigate.clone();
        let code = code.clone();
        let error = error.clone();

        Callback::from(move |_: MouseEvent| match registry.confirm_verification(&code) {
            Ok(true) => on_navigate.emit(View::Login),
            Ok(false) => error.set(Some("Invalid verification code".to_string())),
            Err(e) => error.set(Some(e.to_string())),
        })
    };

    let on_skip = props.on_navigate.reform(|_: MouseEvent| View::Login);

    html! {
        <div class="auth-card">
            <h1 class="auth-title">{"Verify your email"}</h1>
            if let Some(email) = email {
                <p class="auth-caption">{format!("Enter the 8 digit code sent to {}", email)}</p>
            }

            <input
                type="text"
                placeholder="Code"
                value={(*code).clone()}
                oninput={on_code_input}
            />

            if let Some(message) = (*error).clone() {
                <Alert r#type={AlertType::Danger} title={message} inline={true}>
                </Alert>
            }

            <Button onclick={on_verify} variant={ButtonVariant::Primary} block={true}>
                {"Verify"}
            </Button>

            <p class="auth-footer">
                <button class="link-button" onclick={on_skip}>{"Back to Login"}</button>
            </p>
        </div>
    }
}

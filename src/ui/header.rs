/// Header shell: account links, brand and section navigation

use crate::account::Session;
use crate::ui::View;
use yew::prelude::*;

const SECTIONS: &[&str] = &["Categories", "Sale", "Clearance", "New stock", "Trending"];

#[derive(Properties, PartialEq)]
pub struct ShellHeaderProps {
    pub session: Option<Session>,
    pub on_logout: Callback<()>,
    pub on_navigate: Callback<View>,
}

#[function_component(ShellHeader)]
pub fn shell_header(props: &ShellHeaderProps) -> Html {
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());
    let on_login = props.on_navigate.reform(|_: MouseEvent| View::Login);
    let on_brand = {
        let target = if props.session.is_some() {
            View::Interests
        } else {
            View::Login
        };
        props.on_navigate.reform(move |_: MouseEvent| target)
    };

    html! {
        <div class="header">
            <div class="header-top">
                <span class="header-link">{"Help"}</span>
                <span class="header-link">{"Orders & Returns"}</span>
                if let Some(session) = &props.session {
                    <>
                        <span class="header-link">{session.greeting()}</span>
                        <button class="header-link" onclick={on_logout}>{"Logout"}</button>
                    </>
                } else {
                    <button class="header-link" onclick={on_login}>{"Login"}</button>
                }
            </div>
            <div class="header-main">
                <button class="header-brand" onclick={on_brand}>{"ECOMMERCE"}</button>
                <nav class="header-sections">
                    {for SECTIONS.iter().map(|section| html! {
                        <span class="header-section">{*section}</span>
                    })}
                </nav>
            </div>
        </div>
    }
}

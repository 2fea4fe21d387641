/// Root component: picks the screen from the session state

use crate::account::{AccountRegistry, Session};
use crate::config::ShellConfig;
use crate::storage::PersistentStore;
use crate::ui::View;
use crate::ui::header::ShellHeader;
use crate::ui::interests::InterestsPage;
use crate::ui::login::LoginPage;
use crate::ui::register::RegisterPage;
use crate::ui::verify::VerifyPage;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let store = use_memo((), |_| PersistentStore::browser());
    let config = use_memo((), |_| ShellConfig::default());
    let session = use_state(|| None::<Session>);
    let view = use_state(|| View::Login);

    // Restore a session left in storage by a previous visit
    {
        let store = store.clone();
        let config = config.clone();
        let session = session.clone();
        let view = view.clone();

        use_effect_with((), move |_| {
            if let Ok(store) = &*store {
                let registry = AccountRegistry::with_config(store.clone(), &config);
                match registry.current_session() {
                    Ok(Some(current)) => {
                        session.set(Some(current));
                        view.set(View::Interests);
                    }
                    Ok(None) => {}
                    Err(e) => log::error!("failed to restore session: {}", e),
                }
            }
            || ()
        });
    }

    let store = match &*store {
        Ok(store) => store.clone(),
        Err(e) => {
            log::error!("{}", e);
            return html! {
                <div class="padding-20">
                    <Alert r#type={AlertType::Danger} title={"Storage unavailable"} inline={true}>
                        {e.to_string()}
                    </Alert>
                </div>
            };
        }
    };
    let registry = AccountRegistry::with_config(store.clone(), &config);

    let on_navigate = {
        let view = view.clone();
        Callback::from(move |next: View| view.set(next))
    };

    let on_login = {
        let session = session.clone();
        let view = view.clone();
        Callback::from(move |current: Session| {
            session.set(Some(current));
            view.set(View::Interests);
        })
    };

    let on_logout = {
        let registry = registry.clone();
        let session = session.clone();
        let view = view.clone();
        Callback::from(move |_: ()| match registry.logout() {
            Ok(()) => {
                session.set(None);
                view.set(View::Login);
            }
            Err(e) => log::error!("logout failed: {}", e),
        })
    };

    let body = match (*view, (*session).is_some()) {
        (View::Interests, true) => html! {
            <InterestsPage store={store.clone()} config={(*config).clone()} />
        },
        (View::Verify, _) => html! {
            <VerifyPage registry={registry.clone()} on_navigate={on_navigate.clone()} />
        },
        (View::Register, _) => html! {
            <RegisterPage registry={registry.clone()} on_navigate={on_navigate.clone()} />
        },
        _ => html! {
            <LoginPage
                registry={registry.clone()}
                on_login={on_login}
                on_navigate={on_navigate.clone()}
            />
        },
    };

    html! {
        <>
            <ShellHeader
                session={(*session).clone()}
                on_logout={on_logout}
                on_navigate={on_navigate}
            />
            {body}
        </>
    }
}

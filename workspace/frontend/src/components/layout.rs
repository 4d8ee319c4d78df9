use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: AttrValue,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <div class="flex flex-col min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm px-6">
                <span class="text-xl font-bold">{props.title.clone()}</span>
            </div>
            <main class="flex-1 p-6 mx-auto w-full max-w-6xl">
                { for props.children.iter() }
            </main>
        </div>
    }
}

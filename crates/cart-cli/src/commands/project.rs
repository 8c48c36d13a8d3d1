use cart_view::{check_project, reset_cookies, ProjectCheck};

pub fn project(cookie: &str, reset: bool) {
    if reset {
        for assignment in reset_cookies() {
            println!("set_cookie={assignment}");
        }
        println!("status=selection_required");
        return;
    }

    match check_project(cookie) {
        ProjectCheck::Selected { id, name } => {
            println!("status=selected project_id={id} project_name={name}");
        }
        ProjectCheck::SelectionRequired => println!("status=selection_required"),
    }
}

// src/views/auth.rs

use maud::{Markup, html};

use super::{Page, layout};

pub fn login(page: &Page<'_>) -> Markup {
    layout(
        page,
        "Log in",
        html! {
            div class="row justify-content-center" {
                div class="col-md-5" {
                    h1 class="h3 mb-3" { "Log in" }
                    form method="post" action="/auth/login" {
                        div class="mb-3" {
                            label.form-label for="username" { "Username" }
                            input.form-control id="username" name="username" required autofocus;
                        }
                        div class="mb-3" {
                            label.form-label for="password" { "Password" }
                            input.form-control id="password" type="password" name="password" required;
                        }
                        button.btn.btn-primary type="submit" { "Log in" }
                    }
                    p class="mt-3" { "No account yet? " a href="/auth/register" { "Register" } }
                }
            }
        },
    )
}

pub fn register(page: &Page<'_>) -> Markup {
    layout(
        page,
        "Register",
        html! {
            div class="row justify-content-center" {
                div class="col-md-6" {
                    h1 class="h3 mb-3" { "Create an account" }
                    form method="post" action="/auth/register" {
                        div class="mb-3" {
                            label.form-label for="full_name" { "Full name" }
                            input.form-control id="full_name" name="full_name" required;
                        }
                        div class="mb-3" {
                            label.form-label for="username" { "Username" }
                            input.form-control id="username" name="username" minlength="3" maxlength="50" required;
                        }
                        div class="mb-3" {
                            label.form-label for="email" { "Email" }
                            input.form-control id="email" type="email" name="email" required;
                        }
                        div class="mb-3" {
                            label.form-label for="password" { "Password" }
                            input.form-control id="password" type="password" name="password" minlength="4" required;
                        }
                        div class="mb-3" {
                            label.form-label for="confirm_password" { "Confirm password" }
                            input.form-control id="confirm_password" type="password" required;
                        }
                        button.btn.btn-primary type="submit" { "Register" }
                    }
                    p class="mt-3" { "Already registered? " a href="/auth/login" { "Log in" } }
                }
            }
        },
    )
}

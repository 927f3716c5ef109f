// src/common/navigation.rs

// Destinos fixos de redirecionamento do console
pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_PATH: &str = "/admin";

/// Quem sabe mudar a "localização" do operador.
///
/// O destino fica guardado e a próxima resposta vira um redirecionamento.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

pub fn render_password_reset(reset_url: &str, ttl_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Redefinição de senha</h2>
    <p>Recebemos um pedido para redefinir a senha da sua conta na Mais criança.</p>
    <p><a href="{reset_url}" style="display: inline-block; padding: 10px 20px; background: #f26b3a; color: white; text-decoration: none; border-radius: 4px;">Redefinir senha</a></p>
    <p style="color: #666; font-size: 14px;">Este link expira em {ttl_minutes} minutos. Se você não fez este pedido, ignore este email.</p>
</body>
</html>"#
    )
}

pub fn render_password_changed(base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Senha alterada</h2>
    <p>A senha da sua conta na Mais criança foi alterada e todas as sessões foram encerradas.</p>
    <p><a href="{base_url}/login" style="display: inline-block; padding: 10px 20px; background: #f26b3a; color: white; text-decoration: none; border-radius: 4px;">Entrar</a></p>
    <p style="color: #666; font-size: 14px;">Se não foi você, solicite uma nova redefinição imediatamente.</p>
</body>
</html>"#
    )
}

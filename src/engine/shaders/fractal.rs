pub mod vs {
    vulkano_shaders::shader! {
        ty: "vertex",
        src: r"
        #version 460

        layout(location = 0) in vec2 position;

        void main() {
            gl_Position = vec4(position, 0.0, 1.0);
        }
        "
    }
}

pub mod fs {
    vulkano_shaders::shader! {
        ty: "fragment",
        src: r"
        #version 460

        layout(location = 0) out vec4 f_color;

        layout(push_constant) uniform Uniforms {
            vec2 limits;
            vec2 loc;
            float scale;
            float maxIterations;
        } u;

        // https://github.com/hughsk/glsl-hsv2rgb
        vec3 hsv2rgb(vec3 c) {
            vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
            vec3 p = abs(fract(c.xxx + K.xyz) * 6.0 - K.www);
            return c.z * mix(K.xxx, clamp(p - K.xxx, 0.0, 1.0), c.y);
        }

        void main() {
            // framebuffer y grows downwards, the complex plane upwards
            vec2 pixel = vec2(gl_FragCoord.x, u.limits.y - gl_FragCoord.y);
            vec2 uv = (2.0 * pixel - u.limits) / u.limits.y;
            vec2 c = uv * (2.0 / u.scale) + u.loc;

            int limit = int(u.maxIterations);
            vec2 z = vec2(0.0);
            int i;

            for (i = 0; i < limit; i++) {
                z = vec2(z.x * z.x - z.y * z.y, 2.0 * z.x * z.y) + c;

                if (dot(z, z) > 4.0) {
                    break;
                }
            }

            if (i >= limit) {
                f_color = vec4(0.0, 0.0, 0.0, 1.0);
                return;
            }

            float t = float(i) / max(u.maxIterations, 1.0);
            f_color = vec4(hsv2rgb(vec3(t, 0.8, 1.0)), 1.0);
        }
        "
    }
}

use crate::models::Theme;

pub fn render_index(theme: Theme) -> String {
    INDEX_HTML
        .replace("{{THEME}}", theme.as_str())
        .replace("{{THEME_ICON}}", theme.icon())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Home Energy</title>
  <script src="https://code.highcharts.com/highcharts.js"></script>
  <style>
    :root,
    [data-theme="dark"] {
      --bg: #0f0f0f;
      --card: #1a1a1a;
      --border: #2a2a2a;
      --ink: #f1f1f1;
      --muted: #888888;
      --accent: #4a9eff;
    }

    [data-theme="light"] {
      --bg: #f1f5f9;
      --card: #ffffff;
      --border: #e2e8f0;
      --ink: #0f172a;
      --muted: #64748b;
      --accent: #3b82f6;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
      padding: 24px;
      transition: background 200ms ease, color 200ms ease;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 24px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 20px;
      opacity: 0;
      transform: translateY(20px);
      transition: opacity 0.5s ease, transform 0.5s ease;
    }

    .card.shown {
      opacity: 1;
      transform: translateY(0);
    }

    .card h2 {
      margin: 0 0 12px;
      font-size: 1rem;
      color: var(--muted);
      font-weight: 500;
    }

    button,
    select {
      background: transparent;
      color: var(--ink);
      border: 1px solid var(--border);
      border-radius: 999px;
      padding: 6px 14px;
      font: inherit;
      cursor: pointer;
    }

    .period-btn.active {
      background: var(--accent);
      border-color: var(--accent);
      color: #fff;
    }

    .totals {
      display: flex;
      gap: 28px;
      align-items: baseline;
      margin: 12px 0;
    }

    .total-value {
      font-size: 2rem;
      font-weight: 600;
    }

    .muted {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .device-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 10px 0;
      border-bottom: 1px solid var(--border);
      transition: transform 150ms ease;
    }

    .device-item:last-child {
      border-bottom: none;
    }

    .device-item.pressed {
      transform: scale(0.98);
    }

    .device-item input:disabled {
      cursor: not-allowed;
    }

    .consumption-item {
      display: grid;
      grid-template-columns: 140px 1fr 80px;
      gap: 12px;
      align-items: center;
      margin-bottom: 10px;
    }

    .consumption-bar {
      height: 8px;
      background: var(--border);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .consumption-value {
      text-align: right;
      color: var(--muted);
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <header>
    <h1>Home Energy</h1>
    <button id="themeToggle" type="button" aria-label="Toggle theme"><span class="theme-icon">{{THEME_ICON}}</span></button>
  </header>

  <main class="grid">
    <section class="card">
      <h2>Usage</h2>
      <div>
        <button class="period-btn active" data-period="week" type="button">Week</button>
        <button class="period-btn" data-period="month" type="button">Month</button>
        <select id="periodSelector">
          <option value="week">This week</option>
          <option value="month">This month</option>
        </select>
      </div>
      <div class="totals">
        <div>
          <div class="total-value"><span id="totalUsage">-</span> kWh</div>
          <div class="muted">Total</div>
        </div>
        <div>
          <div><span class="comparison-icon"></span> <span id="lastPeriodUsage">-</span> kWh</div>
          <div class="muted">Previous period <span id="changePercent"></span></div>
        </div>
      </div>
      <div id="usageChart"></div>
    </section>

    <section class="card">
      <h2>Peak hours</h2>
      <div id="peakHourChart"></div>
    </section>

    <section class="card">
      <h2>Devices</h2>
      <div id="deviceList"></div>
    </section>

    <section class="card">
      <h2>Consumption by device</h2>
      <div class="device-consumption-list"></div>
    </section>
  </main>

  <script>
    const root = document.documentElement;
    const themeIcon = document.querySelector('.theme-icon');
    const periodButtons = document.querySelectorAll('.period-btn');
    const periodSelector = document.getElementById('periodSelector');
    const totalEl = document.getElementById('totalUsage');
    const lastPeriodEl = document.getElementById('lastPeriodUsage');
    const changeEl = document.getElementById('changePercent');
    const comparisonIcon = document.querySelector('.comparison-icon');
    const deviceListEl = document.getElementById('deviceList');
    const consumptionList = document.querySelector('.device-consumption-list');

    const charts = {
      usage: { target: 'usageChart', handle: null, revision: 0 },
      hourly: { target: 'peakHourChart', handle: null, revision: 0 }
    };

    const toHighcharts = (config) => {
      const p = config.palette;
      const axisLabels = { color: p.text_color, fontSize: config.kind === 'column' ? '12px' : '10px' };
      const series = {
        name: config.series_name,
        data: config.values,
        color: config.kind === 'column'
          ? { linearGradient: { x1: 0, y1: 0, x2: 0, y2: 1 }, stops: [[0, p.primary_color], [1, p.secondary_color]] }
          : p.primary_color
      };
      if (config.kind === 'areaspline') {
        series.fillColor = {
          linearGradient: { x1: 0, y1: 0, x2: 0, y2: 1 },
          stops: [[0, p.primary_color + '4d'], [1, p.primary_color + '0d']]
        };
      }
      const tooltip = { backgroundColor: p.background_color, borderColor: p.grid_color, style: { color: p.text_color } };
      if (config.tooltip_format) {
        tooltip.formatter = function () {
          return config.tooltip_format.replace('{x}', this.x).replace('{y}', this.y);
        };
      }
      return {
        chart: { type: config.kind, backgroundColor: 'transparent', height: config.height || null },
        title: { text: null },
        xAxis: {
          categories: config.categories,
          gridLineWidth: 0,
          lineColor: p.grid_color,
          tickColor: p.grid_color,
          labels: { step: config.label_step, style: axisLabels }
        },
        yAxis: {
          title: { text: config.y_axis_title, style: axisLabels },
          gridLineColor: p.grid_color,
          labels: { style: axisLabels }
        },
        legend: { enabled: false },
        plotOptions: {
          column: { borderWidth: 0, borderRadius: 4, pointPadding: 0.1, groupPadding: 0.1 },
          areaspline: { fillOpacity: 0.3, marker: { enabled: false, states: { hover: { enabled: true, radius: 4 } } } }
        },
        series: [series],
        tooltip,
        credits: { enabled: false }
      };
    };

    const syncChart = (slot, view) => {
      if (!view.config) {
        if (slot.handle) {
          slot.handle.destroy();
          slot.handle = null;
        }
        return;
      }
      if (!slot.handle || slot.revision !== view.revision) {
        if (slot.handle) {
          slot.handle.destroy();
        }
        slot.handle = Highcharts.chart(slot.target, toHighcharts(view.config));
        slot.revision = view.revision;
        return;
      }
      slot.handle.xAxis[0].setCategories(view.config.categories, false);
      slot.handle.series[0].setData(view.config.values, true);
    };

    const renderDevices = (devices) => {
      deviceListEl.innerHTML = '';
      devices.forEach((device) => {
        const item = document.createElement('div');
        item.className = 'device-item';
        item.dataset.device = device.id;
        item.innerHTML = `
          <span>${device.icon} ${device.name}</span>
          <span class="device-status">${device.status}</span>
          <label class="device-toggle">
            <input type="checkbox" id="${device.id}-toggle" ${device.on ? 'checked' : ''} ${device.id === 'fridge' ? 'disabled' : ''} />
          </label>
        `;
        item.querySelector('input').addEventListener('change', () => {
          item.classList.add('pressed');
          setTimeout(() => item.classList.remove('pressed'), 150);
          post(`/api/devices/${encodeURIComponent(device.id)}/toggle`);
        });
        deviceListEl.appendChild(item);
      });
    };

    const renderRanking = (ranking) => {
      consumptionList.innerHTML = '';
      ranking.forEach((entry) => {
        const item = document.createElement('div');
        item.className = 'consumption-item';
        item.innerHTML = `
          <div class="consumption-device">${entry.icon} ${entry.name}</div>
          <div class="consumption-bar"><div class="bar-fill" style="width: ${entry.percentage}%"></div></div>
          <span class="consumption-value">${entry.consumption_kwh.toFixed(1)} kWh</span>
        `;
        consumptionList.appendChild(item);
      });
    };

    let lastTheme = root.getAttribute('data-theme');
    let lastDevices = '';

    const apply = (snapshot) => {
      const themeChanged = snapshot.theme !== lastTheme;
      root.setAttribute('data-theme', snapshot.theme);
      themeIcon.textContent = snapshot.theme_icon;
      lastTheme = snapshot.theme;

      periodButtons.forEach((btn) => btn.classList.toggle('active', btn.dataset.period === snapshot.period));
      periodSelector.value = snapshot.period;

      if (snapshot.summary) {
        totalEl.textContent = snapshot.summary.total_text;
        lastPeriodEl.textContent = snapshot.summary.prior_total_text;
        comparisonIcon.textContent = snapshot.summary.glyph;
        changeEl.textContent = snapshot.summary.change_percent === null ? '' : `(${snapshot.summary.change_percent}%)`;
      }

      const devicesKey = JSON.stringify(snapshot.devices.map((d) => [d.id, d.on]));
      if (devicesKey !== lastDevices) {
        renderDevices(snapshot.devices);
        lastDevices = devicesKey;
      }
      renderRanking(snapshot.ranking);

      const sync = () => {
        syncChart(charts.usage, snapshot.charts.usage);
        syncChart(charts.hourly, snapshot.charts.hourly);
      };
      if (themeChanged) {
        setTimeout(sync, 100);
      } else {
        sync();
      }
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (res.ok) {
        apply(await res.json());
      }
    };

    const refresh = async () => {
      const res = await fetch('/api/dashboard');
      if (res.ok) {
        apply(await res.json());
      }
    };

    document.getElementById('themeToggle').addEventListener('click', () => post('/api/theme/toggle'));
    periodButtons.forEach((btn) => {
      btn.addEventListener('click', () => post('/api/period', { period: btn.dataset.period }));
    });
    periodSelector.addEventListener('change', (event) => post('/api/period', { period: event.target.value }));

    refresh().then(() => {
      document.querySelectorAll('.card').forEach((card, index) => {
        setTimeout(() => card.classList.add('shown'), 100 + index * 100);
      });
    });
    setInterval(() => refresh().catch(() => {}), 2000);
  </script>
</body>
</html>
"#;
